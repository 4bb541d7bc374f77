//! Interpreting pipelines: scalar values, expression evaluation and realization.

pub use self::expr::Params;
pub use self::realize::*;
pub use self::value::*;

mod expr;
mod realize;
mod value;
