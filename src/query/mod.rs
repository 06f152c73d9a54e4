//! Path queries over snapshot trees.

pub mod path;

pub use path::*;
