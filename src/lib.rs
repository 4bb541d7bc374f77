//! A small halide-style pixel pipeline evaluator.
//!
//! Pipelines are built from stages defined in terms of the pixel coordinate
//! `(x, y, c)` and of reads from earlier stages. Realizing a stage computes
//! every stage it depends on over the requested domain, clamping any read
//! that falls outside a stage's extent.

#[macro_use]
pub mod image;
pub mod error;
pub mod eval;
#[macro_use]
pub mod syntax;
pub mod kernels;
pub mod lower;

pub use crate::error::*;
pub use crate::eval::*;
pub use crate::image::*;
pub use crate::kernels::*;
pub use crate::lower::*;
pub use crate::syntax::*;
