//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `plan`: Plan ranges above recorded ones and print their fixtures
//! - `watermark`: Show the high-water marks of recorded ranges
//! - `overlap_messages`: Print the server messages overlap tests expect
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod overlap_messages;
pub mod plan;
pub mod validate;
pub mod watermark;

pub use completions::CompletionsCommand;
pub use overlap_messages::OverlapMessagesCommand;
pub use plan::PlanCommand;
pub use validate::ValidateCommand;
pub use watermark::WatermarkCommand;
