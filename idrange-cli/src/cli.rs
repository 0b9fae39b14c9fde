//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, OverlapMessagesCommand, PlanCommand, ValidateCommand, WatermarkCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use idrange::config::OutputFormat;
use std::path::PathBuf;

/// Command-line tool for planning collision-free ID range fixtures.
#[derive(Parser)]
#[command(name = "idrange")]
#[command(version, about = "Plan collision-free ID ranges for directory-service tests", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read an explicit configuration file
    #[arg(long, value_name = "PATH", global = true, env = "IDRANGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output formats accepted by `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON
    Json,
    /// YAML documents
    Yaml,
    /// Aligned text for a terminal
    Human,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Human => OutputFormat::Human,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Plan new ranges above the existing ones and print their fixtures
    Plan(PlanCommand),

    /// Print the high-water marks of recorded ranges
    Watermark(WatermarkCommand),

    /// Print the server messages overlap tests expect
    OverlapMessages(OverlapMessagesCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
