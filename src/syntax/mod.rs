//! The syntax used to represent image processing pipelines.

pub use self::ast::*;
pub use self::graph::*;
pub use self::pretty_print::*;

mod ast;
#[macro_use]
mod dsl;
mod graph;
mod pretty_print;
