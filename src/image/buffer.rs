use std::fmt;
use std::ops::{Index, IndexMut};

use crate::image::traits::*;

/// An interleaved image buffer. Samples for a pixel are stored contiguously,
/// so the sample at `(x, y, c)` lives at `(y * width + x) * channels + c`.
#[derive(Clone, PartialEq)]
pub struct ImageBuffer<T> {
    width: usize,
    height: usize,
    channels: usize,
    buffer: Vec<T>
}

impl<T: Sample> Image<T> for ImageBuffer<T> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn data(&self) -> &[T] {
        &self.buffer
    }

    #[inline]
    fn get(&self, x: usize, y: usize, c: usize) -> T {
        self.buffer[self.offset(x, y, c)]
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, c: usize, v: T) {
        let offset = self.offset(x, y, c);
        self.buffer[offset] = v;
    }
}

pub type GrayImage = ImageBuffer<u8>;

impl<T: Sample> ImageBuffer<T> {
    pub fn new(width: usize, height: usize, channels: usize) -> ImageBuffer<T> {
        let buffer = vec![T::zero(); width * height * channels];
        ImageBuffer { width, height, channels, buffer }
    }

    /// Wraps an existing interleaved buffer. Returns `None` if the buffer
    /// length doesn't match the given extents.
    pub fn from_raw(width: usize, height: usize, channels: usize, buffer: Vec<T>) -> Option<ImageBuffer<T>> {
        if buffer.len() != width * height * channels {
            return None;
        }
        Some(ImageBuffer { width, height, channels, buffer })
    }

    pub fn from_fn<F>(width: usize, height: usize, channels: usize, f: F) -> ImageBuffer<T>
    where
        F: Fn(usize, usize, usize) -> T
    {
        let mut buffer = Vec::with_capacity(width * height * channels);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    buffer.push(f(x, y, c));
                }
            }
        }
        ImageBuffer { width, height, channels, buffer }
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    pub fn into_raw(self) -> Vec<T> {
        self.buffer
    }

    /// Converts every sample through the evaluator's value type.
    pub fn convert<U: Sample>(&self) -> ImageBuffer<U> {
        ImageBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            buffer: self.buffer.iter().map(|s| U::from_value(s.to_value())).collect()
        }
    }

    /// True if any extent is zero, i.e. there is nothing to sample.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, c: usize) -> usize {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        (y * self.width + x) * self.channels + c
    }
}

impl<T: Sample> Index<[usize; 3]> for ImageBuffer<T> {
    type Output = T;

    fn index(&self, [x, y, c]: [usize; 3]) -> &T {
        &self.buffer[self.offset(x, y, c)]
    }
}

impl<T: Sample> IndexMut<[usize; 3]> for ImageBuffer<T> {
    fn index_mut(&mut self, [x, y, c]: [usize; 3]) -> &mut T {
        let offset = self.offset(x, y, c);
        &mut self.buffer[offset]
    }
}

impl<T: fmt::Debug + Sample> fmt::Debug for ImageBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Image(width: {:?}, height: {:?}, channels: {:?}, buffer: {{",
            self.width, self.height, self.channels
        )?;
        for y in 0..self.height {
            write!(f, "  ")?;
            for x in 0..self.width {
                if self.channels == 1 {
                    write!(f, "{:?}", self.get(x, y, 0))?;
                } else {
                    let pixel: Vec<T> = (0..self.channels).map(|c| self.get(x, y, c)).collect();
                    write!(f, "{:?}", pixel)?;
                }
                if x < self.width - 1 {
                    write!(f, ", ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

/// Creates a single-channel image from rows separated by semicolons.
///
/// ```
/// use halo::*;
/// let image = gray_image!(1, 2, 3; 4, 5, 6);
/// assert_eq!(image.dimensions(), (3, 2, 1));
/// assert_eq!(image.get(2, 1, 0), 6);
/// ```
#[macro_export]
macro_rules! gray_image {
    // Non-empty image of default channel type u8
    ($( $( $x: expr ),*);*) => {
        $crate::gray_image!(type: u8, $( $( $x ),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( $x: expr ),*);*) => {
        {
            let nested_array: &[&[$channel_type]] = &[ $( &[ $($x),* ] ),* ];
            let height = nested_array.len();
            let width = nested_array[0].len();

            let buffer: Vec<$channel_type> = nested_array.iter()
                .flat_map(|row| row.iter())
                .cloned()
                .collect();

            $crate::image::ImageBuffer::<$channel_type>::from_raw(width, height, 1, buffer)
                .expect("gray_image! rows must all have the same length")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_layout() {
        let image = ImageBuffer::<u8>::from_fn(2, 2, 3, |x, y, c| (100 * y + 10 * x + c) as u8);
        assert_eq!(image.data(), &[0, 1, 2, 10, 11, 12, 100, 101, 102, 110, 111, 112]);
        assert_eq!(image[[1, 1, 2]], 112);
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ImageBuffer::from_raw(2, 2, 1, vec![0u8; 4]).is_some());
        assert!(ImageBuffer::from_raw(2, 2, 1, vec![0u8; 5]).is_none());
    }

    #[test]
    fn test_get_clamped_in_bounds_matches_get() {
        let image = gray_image!(1, 2, 3; 4, 5, 6; 7, 8, 9);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(image.get_clamped(x as i64, y as i64, 0), image.get(x, y, 0));
            }
        }
    }

    #[test]
    fn test_get_clamped_out_of_bounds_uses_nearest_edge() {
        let image = gray_image!(1, 2, 3; 4, 5, 6; 7, 8, 9);
        // Edges
        assert_eq!(image.get_clamped(-1, 1, 0), 4);
        assert_eq!(image.get_clamped(5, 1, 0), 6);
        assert_eq!(image.get_clamped(1, -3, 0), 2);
        assert_eq!(image.get_clamped(1, 3, 0), 8);
        // Corners
        assert_eq!(image.get_clamped(-1, -1, 0), 1);
        assert_eq!(image.get_clamped(10, -1, 0), 3);
        assert_eq!(image.get_clamped(-7, 7, 0), 7);
        assert_eq!(image.get_clamped(3, 3, 0), 9);
        // Channels clamp too
        assert_eq!(image.get_clamped(0, 0, 2), 1);
    }

    #[test]
    fn test_convert_wraps_and_saturates() {
        let image = ImageBuffer::<i32>::from_raw(3, 1, 1, vec![-1, 256, 7]).unwrap();
        let narrowed: ImageBuffer<u8> = image.convert();
        assert_eq!(narrowed.data(), &[255, 0, 7]);

        let floats = ImageBuffer::<f32>::from_raw(3, 1, 1, vec![-4.0, 300.5, 12.9]).unwrap();
        let narrowed: ImageBuffer<u8> = floats.convert();
        assert_eq!(narrowed.data(), &[0, 255, 12]);
    }
}
