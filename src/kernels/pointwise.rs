//! Per-pixel transforms with no neighbourhood reads.

use crate::error::PipelineError;
use crate::eval::{Domain, Params, ScalarType};
use crate::image::{GrayImage, Image};
use crate::syntax::*;

fn domain_of(image: &GrayImage) -> Domain {
    let (width, height, channels) = image.dimensions();
    Domain::new(width, height, channels)
}

/// `out(x, y, c) = u8(min(input(x, y, c) * factor, 255.0))`
pub fn brighten_pipeline(image: GrayImage, factor: f32) -> Result<(Pipeline, Func), PipelineError> {
    let (x, y, c) = (Var::X, Var::Y, Var::C);
    let mut p = Pipeline::new("brighten");
    let input = p.input("input", image);
    func!(p, brighter = cast(ScalarType::U8, min(input.at(x, y, c) * factor, 255.0f32)));
    Ok((p, brighter))
}

/// Scales every sample by `factor`, saturating at 255.
pub fn brighten(image: &GrayImage, factor: f32) -> Result<GrayImage, PipelineError> {
    let (pipeline, brighter) = brighten_pipeline(image.clone(), factor)?;
    pipeline.realize(&brighter, domain_of(image))
}

/// `out(x, y, c) = u8(min(input(x, y, c) + offset, 255))`, where `offset` is
/// bound when the pipeline is realized.
pub fn offset_pipeline(image: GrayImage) -> Result<(Pipeline, Func, Param), PipelineError> {
    let (x, y, c) = (Var::X, Var::Y, Var::C);
    param!(offset);
    let mut p = Pipeline::new("offset");
    let input = p.input("input", image);
    func!(p, output = cast(ScalarType::U8, min(input.at(x, y, c) + &offset, 255)));
    Ok((p, output, offset))
}

/// Adds `amount` to every sample, saturating at 255.
pub fn offset(image: &GrayImage, amount: u8) -> Result<GrayImage, PipelineError> {
    let (pipeline, output, offset) = offset_pipeline(image.clone())?;
    let params = Params::new().with(&offset, amount as i32);
    pipeline.realize_with_params(&output, domain_of(image), &params)
}
