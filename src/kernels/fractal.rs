//! Escape-time rendering of the mandelbrot set.

use std::convert::TryFrom;
use crate::error::PipelineError;
use crate::eval::{Domain, ScalarType};
use crate::image::GrayImage;
use crate::syntax::*;

/// A rectangle in the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32
}

impl Default for Region {
    fn default() -> Region {
        Region { x_min: -1.0, x_max: 1.0, y_min: -1.0, y_max: 1.0 }
    }
}

impl Region {
    /// Reads `[x_min, x_max, y_min, y_max]`. Returns `None` unless there
    /// are exactly four values.
    pub fn from_slice(values: &[f32]) -> Option<Region> {
        match values {
            &[x_min, x_max, y_min, y_max] => Some(Region { x_min, x_max, y_min, y_max }),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    pub region: Region,
    pub width: usize,
    pub height: usize,
    /// Number of times the orbit is iterated per pixel.
    pub iterations: u32,
    /// A point is still bounded while its squared magnitude is below this.
    pub threshold: f32
}

impl Default for FractalParams {
    fn default() -> FractalParams {
        FractalParams {
            region: Region::default(),
            width: 1024,
            height: 1024,
            iterations: 16,
            threshold: 8.0
        }
    }
}

/// Maps a pixel coordinate to the centre of that pixel in `[min, max]`.
fn pixel_centre(v: Var, extent: usize, min: f32, max: f32) -> Expr {
    ((cast(ScalarType::F32, v) + 0.5f32) / extent as f32) * (max - min) + min
}

/// Builds a pipeline computing the escape index of every pixel's orbit under
/// `z = z * z + c`, scaled to `[0, 255]` and replicated across channels.
///
/// The escape index is the number of leading iterations for which the orbit
/// stays below the threshold, so points inside the set map to 255 and points
/// leaving on the first iteration map to 0.
pub fn mandelbrot(params: &FractalParams) -> Result<(Pipeline, Func), PipelineError> {
    if params.width == 0 || params.height == 0 {
        return Err(PipelineError::InvalidDomain { width: params.width, height: params.height, channels: 3 });
    }
    let (x, y) = (Var::X, Var::Y);
    let Region { x_min, x_max, y_min, y_max } = params.region;
    let mut p = Pipeline::new("mandelbrot");

    func!(p, coord_re = pixel_centre(x, params.width, x_min, x_max));
    func!(p, coord_im = pixel_centre(y, params.height, y_min, y_max));

    let (re, im) = (state(0), state(1));
    let escape = p.define_recurrence("escape", Recurrence {
        init: vec![Expr::Float(0.0), Expr::Float(0.0)],
        update: vec![
            re.clone() * re.clone() - im.clone() * im.clone() + coord_re.at(x, y, 0),
            2.0f32 * re.clone() * im.clone() + coord_im.at(x, y, 0)
        ],
        iterations: params.iterations,
        predicate: lt(re.clone() * re + im.clone() * im, params.threshold)
    })?;

    let iterations = i32::try_from(params.iterations).map_err(|_| PipelineError::InvalidRecurrence {
        name: escape.name().to_string(),
        reason: format!("{} iterations can't be scaled to an intensity", params.iterations)
    })?;
    func!(p, out = cast(ScalarType::U8, escape.at(x, y, 0) * 255 / iterations));
    Ok((p, out))
}

/// Renders the mandelbrot set as a three channel image.
pub fn render_mandelbrot(params: &FractalParams) -> Result<GrayImage, PipelineError> {
    let (pipeline, out) = mandelbrot(params)?;
    pipeline.realize(&out, Domain::new(params.width, params.height, 3))
}
