use crate::eval::Value;

/// A pixel channel type that can be stored in an image buffer and exchanged
/// with the pipeline evaluator.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Used when initialising images.
    fn zero() -> Self;

    /// Narrows an evaluated value to this type. Integers wrap and floats
    /// saturate, matching an explicit cast in a pipeline definition.
    fn from_value(v: Value) -> Self;

    fn to_value(self) -> Value;
}

macro_rules! impl_int_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                fn zero() -> Self {
                    0
                }

                fn from_value(v: Value) -> Self {
                    match v {
                        Value::Int(i) => i as $t,
                        Value::Float(f) => f as $t,
                        Value::Bool(b) => b as $t
                    }
                }

                fn to_value(self) -> Value {
                    Value::Int(self as i64)
                }
            }
        )*
    }
}

impl_int_sample!(u8, u16, i32);

impl Sample for f32 {
    fn zero() -> Self {
        0.0
    }

    fn from_value(v: Value) -> Self {
        v.as_f32()
    }

    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl Sample for Value {
    fn zero() -> Self {
        Value::Int(0)
    }

    fn from_value(v: Value) -> Self {
        v
    }

    fn to_value(self) -> Value {
        self
    }
}

/// Resolves a possibly out-of-range coordinate to the nearest valid index
/// in `[0, extent)`. `extent` must be non-zero.
#[inline]
pub fn clamp_coord(v: i64, extent: usize) -> usize {
    debug_assert!(extent > 0);
    v.max(0).min(extent as i64 - 1) as usize
}

/// A dense image with `channels` samples per pixel, addressed as `(x, y, c)`.
pub trait Image<T: Sample> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    fn dimensions(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), self.channels())
    }

    fn get(&self, x: usize, y: usize, c: usize) -> T;
    fn set(&mut self, x: usize, y: usize, c: usize, v: T);
    fn data(&self) -> &[T];

    /// Reads the sample at the nearest in-bounds coordinate. Each axis is
    /// clamped independently, so this never fails on a non-empty image.
    fn get_clamped(&self, x: i64, y: i64, c: i64) -> T {
        self.get(
            clamp_coord(x, self.width()),
            clamp_coord(y, self.height()),
            clamp_coord(c, self.channels())
        )
    }
}
