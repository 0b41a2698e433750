//! Library exports for strata-cli.
//!
//! The binary is a thin front-end over these modules; exposing them keeps
//! the command definitions testable and lets the build script mirror them.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
