//! Command-line interface module.

mod args;
pub mod build;
pub mod validate;

pub use args::{BuildArgs, Cli, Commands};
