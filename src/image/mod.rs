//! Defines the basic image traits, a buffer-based implementation of them,
//! and functions for loading and saving images.

pub use self::buffer::*;
pub use self::io::*;
pub use self::traits::*;

#[macro_use]
mod buffer;
mod io;
mod traits;
