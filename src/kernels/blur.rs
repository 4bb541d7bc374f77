//! Separable 3x3 blur with a `[1, 2, 1] / 4` kernel.

use crate::error::PipelineError;
use crate::eval::{Domain, ScalarType};
use crate::image::{GrayImage, Image};
use crate::syntax::*;

/// Builds a pipeline blurring `image` first along x and then along y, one
/// channel at a time. Samples are widened to u16 so the weighted sums can't
/// overflow, and both passes divide with truncation.
pub fn blur3(image: GrayImage) -> Result<(Pipeline, Func), PipelineError> {
    let (x, y, c) = (Var::X, Var::Y, Var::C);
    let mut p = Pipeline::new("blur3");
    let input = p.input("input", image);

    func!(p, input_16 = cast(ScalarType::U16, input.at(x, y, c)));
    func!(p, blur_x = (input_16.at(x - 1, y, c) + 2 * input_16.at(x, y, c) + input_16.at(x + 1, y, c)) / 4);
    func!(p, blur_y = (blur_x.at(x, y - 1, c) + 2 * blur_x.at(x, y, c) + blur_x.at(x, y + 1, c)) / 4);
    func!(p, out = cast(ScalarType::U8, blur_y.at(x, y, c)));

    Ok((p, out))
}

/// Blurs `image`, producing an image of the same dimensions.
pub fn blur_image(image: &GrayImage) -> Result<GrayImage, PipelineError> {
    let (width, height, channels) = image.dimensions();
    let (pipeline, out) = blur3(image.clone())?;
    pipeline.realize(&out, Domain::new(width, height, channels))
}
