use halo::*;

#[test_log::test]
fn blur_of_centre_pixel() {
    let mut input = GrayImage::new(4, 4, 1);
    input.set(2, 2, 0, 255);

    let output = blur_image(&input).unwrap();
    let expected = gray_image!(
        0,  0,  0,  0;
        0, 15, 31, 15;
        0, 31, 63, 31;
        0, 15, 31, 15);
    assert_eq!(output, expected);
}

#[test]
fn blur_weights_follow_the_kernel() {
    // [1, 2, 1] x [1, 2, 1] / 16 of 160, truncating after each pass
    let mut input = GrayImage::new(5, 5, 1);
    input.set(2, 2, 0, 160);
    let output = blur_image(&input).unwrap();
    let window: Vec<u8> = (1..4)
        .flat_map(|y| (1..4).map(move |x| (x, y)))
        .map(|(x, y)| output.get(x, y, 0))
        .collect();
    assert_eq!(window, vec![10, 20, 10, 20, 40, 20, 10, 20, 10]);
}

#[test_log::test]
fn mandelbrot_small_render() {
    let params = FractalParams { width: 4, height: 4, threshold: 8.0, iterations: 16, ..FractalParams::default() };
    let output = render_mandelbrot(&params).unwrap();

    let rows: [[u8; 4]; 4] = [
        [63, 255, 79, 31],
        [207, 255, 255, 47],
        [207, 255, 255, 47],
        [63, 255, 79, 31]
    ];
    let expected: Vec<u8> = rows.iter()
        .flat_map(|row| row.iter())
        .flat_map(|&v| vec![v; 3])
        .collect();
    assert_eq!(output.dimensions(), (4, 4, 3));
    assert_eq!(output.data(), &expected[..]);
}

#[test]
fn mandelbrot_wide_region() {
    let params = FractalParams {
        region: Region { x_min: -2.0, x_max: 1.0, y_min: -1.0, y_max: 1.0 },
        width: 4,
        height: 2,
        ..FractalParams::default()
    };
    let output = render_mandelbrot(&params).unwrap();
    for y in 0..2 {
        let row: Vec<u8> = (0..4).map(|x| output.get(x, y, 0)).collect();
        assert_eq!(row, vec![47, 79, 255, 47]);
    }
}

#[test]
fn degenerate_domains_are_rejected() {
    let params = FractalParams { width: 0, ..FractalParams::default() };
    match render_mandelbrot(&params) {
        Err(PipelineError::InvalidDomain { width, .. }) => assert_eq!(width, 0),
        r => panic!("unexpected result {:?}", r)
    }

    let (pipeline, g) = gradient_pipeline().unwrap();
    let r: Result<ImageBuffer<i32>, _> = pipeline.realize(&g, Domain::new(3, 0, 1));
    assert!(matches!(r, Err(PipelineError::InvalidDomain { height: 0, .. })));
}

#[test]
fn stages_can_be_shared_between_outputs() -> Result<(), PipelineError> {
    let (x, y, c) = (Var::X, Var::Y, Var::C);
    let mut p = Pipeline::new("shared");
    let input = p.input("input", gray_image!(10, 20; 30, 40));
    func!(p, doubled = input.at(x, y, c) * 2);
    func!(p, sum = doubled.at(x, y, c) + doubled.at(x + 1, y, c));
    func!(p, diff = doubled.at(x, y + 1, c) - doubled.at(x, y, c));

    let sum: GrayImage = p.realize(&sum, Domain::new(2, 2, 1))?;
    let diff: GrayImage = p.realize(&diff, Domain::new(2, 2, 1))?;
    assert_eq!(sum, gray_image!(60, 80; 140, 160));
    assert_eq!(diff, gray_image!(40, 40; 0, 0));
    Ok(())
}
