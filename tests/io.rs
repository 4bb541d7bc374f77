use halo::*;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("halo_io_{}", name))
}

#[test]
fn png_round_trip_through_a_file() {
    let image = GrayImage::from_fn(13, 7, 3, |x, y, c| (x * 19 + y * 7 + c * 101) as u8);
    let path = temp_path("round_trip.png");
    save_image(&path, &image).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, image);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn blurred_image_survives_a_round_trip() {
    let image = GrayImage::from_fn(8, 8, 1, |x, y, _| if (x + y) % 3 == 0 { 255 } else { 0 });
    let blurred = blur_image(&image).unwrap();
    let path = temp_path("blurred.png");
    save_image(&path, &blurred).unwrap();
    assert_eq!(load_image(&path).unwrap(), blurred);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unknown_extensions_are_rejected() {
    let image = GrayImage::new(2, 2, 1);
    match save_image(temp_path("image.bmp"), &image) {
        Err(ImageError::UnsupportedFormat(_)) => {},
        r => panic!("unexpected result {:?}", r)
    }
}

#[test]
fn missing_files_fail_to_open() {
    match load_image(temp_path("does_not_exist.png")) {
        Err(ImageError::Open { .. }) => {},
        r => panic!("unexpected result {:?}", r)
    }
}
