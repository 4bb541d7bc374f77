//! Ready-made pipelines built with the DSL.

pub use self::blur::*;
pub use self::fractal::*;
pub use self::gradient::*;
pub use self::pointwise::*;

mod blur;
mod fractal;
mod gradient;
mod pointwise;
