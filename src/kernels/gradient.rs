use crate::error::PipelineError;
use crate::eval::Domain;
use crate::image::ImageBuffer;
use crate::syntax::*;

/// `gradient(x, y) = x + y`
pub fn gradient_pipeline() -> Result<(Pipeline, Func), PipelineError> {
    let (x, y) = (Var::X, Var::Y);
    let mut p = Pipeline::new("gradient");
    func!(p, gradient = Expr::from(x + y));
    Ok((p, gradient))
}

/// Realizes the gradient as a single channel `i32` image.
pub fn gradient(width: usize, height: usize) -> Result<ImageBuffer<i32>, PipelineError> {
    let (pipeline, gradient) = gradient_pipeline()?;
    pipeline.realize(&gradient, Domain::new(width, height, 1))
}
