//! Library exports for idrange-cli.
//!
//! This module exports the CLI structure so the binary and the integration
//! tests share one definition of the commands.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
