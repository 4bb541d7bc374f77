//! Loading and saving 8-bit images. PNG can be read and written; GIF can only
//! be written.

use crate::error::ImageError;
use crate::image::{GrayImage, Image, ImageBuffer};
use std::{
    convert::TryFrom,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format { Png, Gif }

fn format_of(path: &Path) -> Result<Format, ImageError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => Ok(Format::Png),
        Some("gif") => Ok(Format::Gif),
        _ => Err(ImageError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Loads an image, expanding palettes and low bit depths to 8-bit samples.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<GrayImage, ImageError> {
    let path = path.as_ref();
    if format_of(path)? != Format::Png {
        return Err(ImageError::UnsupportedFormat(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| ImageError::Open { path: path.to_path_buf(), source })?;
    let image = read_png(BufReader::new(file))?;
    log::debug!("Loaded {}x{}x{} image from {}", image.width(), image.height(), image.channels(), path.display());
    Ok(image)
}

/// Saves an image, choosing the encoding from the file extension.
pub fn save_image<P: AsRef<Path>>(path: P, image: &GrayImage) -> Result<(), ImageError> {
    let path = path.as_ref();
    let format = format_of(path)?;
    let file = File::create(path).map_err(|source| ImageError::Create { path: path.to_path_buf(), source })?;
    let w = BufWriter::new(file);
    match format {
        Format::Png => write_png(w, image)?,
        Format::Gif => write_gif(w, image)?
    }
    log::debug!("Saved {:?} image to {}", format, path.display());
    Ok(())
}

pub fn read_png<R: Read>(r: R) -> Result<GrayImage, ImageError> {
    let mut decoder = png::Decoder::new(r);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());

    let (width, height) = (info.width as usize, info.height as usize);
    let channels = info.color_type.samples();
    // Rows are tightly packed once everything is 8-bit
    ImageBuffer::from_raw(width, height, channels, buffer)
        .ok_or(ImageError::UnsupportedChannels(channels))
}

pub fn write_png<W: Write>(w: W, image: &GrayImage) -> Result<(), ImageError> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => return Err(ImageError::UnsupportedChannels(n))
    };
    let mut encoder = png::Encoder::new(w, image.width() as u32, image.height() as u32);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.data())?;
    writer.finish()?;
    Ok(())
}

/// Writes a single-frame gif. The encoder quantizes to a 256 colour palette,
/// so unlike png this is lossy for colour images.
pub fn write_gif<W: Write>(mut w: W, image: &GrayImage) -> Result<(), ImageError> {
    let too_large = || ImageError::TooLarge { width: image.width(), height: image.height() };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let frame = match image.channels() {
        1 => gif::Frame::from_rgb(width, height, &expand_gray(image.data())),
        3 => gif::Frame::from_rgb(width, height, image.data()),
        4 => {
            let mut pixels = image.data().to_vec();
            gif::Frame::from_rgba(width, height, &mut pixels)
        },
        n => return Err(ImageError::UnsupportedChannels(n))
    };

    let mut encoder = gif::Encoder::new(&mut w, width, height, &[])?;
    encoder.write_frame(&frame)?;
    Ok(())
}

fn expand_gray(buffer: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(buffer.len() * 3);
    for p in buffer {
        rgb.extend_from_slice(&[*p, *p, *p]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_image(width: usize, height: usize) -> GrayImage {
        ImageBuffer::from_fn(width, height, 3, |x, y, c| ((x * 31 + y * 17 + c * 101) % 256) as u8)
    }

    #[test]
    fn test_png_round_trip_in_memory() {
        for &channels in &[1, 2, 3, 4] {
            let image = ImageBuffer::from_fn(7, 5, channels, |x, y, c| (x * 40 + y * 3 + c) as u8);
            let mut encoded = vec![];
            write_png(&mut encoded, &image).unwrap();
            let decoded = read_png(&encoded[..]).unwrap();
            assert_eq!(decoded, image, "channels = {}", channels);
        }
    }

    #[test]
    fn test_png_rejects_five_channels() {
        let image = GrayImage::new(2, 2, 5);
        let mut encoded = vec![];
        match write_png(&mut encoded, &image) {
            Err(ImageError::UnsupportedChannels(5)) => {},
            r => panic!("unexpected result {:?}", r)
        }
    }

    #[test]
    fn test_gif_writes_header() {
        let mut encoded = vec![];
        write_gif(&mut encoded, &rgb_image(4, 3)).unwrap();
        assert_eq!(&encoded[..6], b"GIF89a");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_of(Path::new("out.PNG")).unwrap(), Format::Png);
        assert_eq!(format_of(Path::new("out.gif")).unwrap(), Format::Gif);
        assert!(format_of(Path::new("out.exr")).is_err());
        assert!(format_of(Path::new("out")).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_open_error() {
        match load_image("/definitely/not/here.png") {
            Err(ImageError::Open { .. }) => {},
            r => panic!("unexpected result {:?}", r)
        }
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("halo-io-{}.png", std::process::id()));
        let image = rgb_image(9, 4);
        save_image(&path, &image).unwrap();
        let loaded = load_image(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, image);
    }
}
