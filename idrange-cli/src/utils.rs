//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, snapshot loading and output formatting.

use crate::error::CliError;
use idrange::config::OutputFormat;
use idrange::{Config, ConfigBuilder, OutputFormatter, RangeSnapshot, RecordedResponses};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Output format chosen on the command line.
    pub format: Option<OutputFormat>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. The `--config` file
/// 3. The project `idrange.yaml`
/// 4. The user `~/.idrange/config.yaml`
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        builder = builder.with_config_file(path);
    }

    builder.build().map_err(CliError::from)
}

/// Pick the output format: command line, then configuration, then human.
pub fn resolve_format(global: &GlobalOptions, config: &Config) -> OutputFormat {
    global
        .format
        .or(config.output_format)
        .unwrap_or_default()
}

/// Create the formatter for the resolved output format.
pub fn formatter(global: &GlobalOptions, config: &Config) -> Box<dyn OutputFormatter> {
    resolve_format(global, config).create_formatter()
}

/// Read recorded `idrange_find` / `trust_find` responses into a snapshot.
pub fn load_snapshot(ranges: &Path, trusts: Option<&Path>) -> Result<RangeSnapshot, CliError> {
    for path in std::iter::once(ranges).chain(trusts) {
        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }
    }

    let source = RecordedResponses::from_files(ranges, trusts)?;
    let snapshot = RangeSnapshot::capture(&source)?;
    log::debug!(
        "read {} at {}",
        ranges.display(),
        snapshot.captured_at().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(snapshot)
}

/// Print formatted output, keeping exactly one trailing newline.
pub fn print_output(output: &str) {
    println!("{}", output.trim_end_matches('\n'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_prefers_flag() {
        let global = GlobalOptions {
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let config = Config {
            output_format: Some(OutputFormat::Yaml),
            ..Default::default()
        };
        assert_eq!(resolve_format(&global, &config), OutputFormat::Json);
    }

    #[test]
    fn test_resolve_format_falls_back_to_config_then_human() {
        let global = GlobalOptions::default();
        let config = Config {
            output_format: Some(OutputFormat::Yaml),
            ..Default::default()
        };
        assert_eq!(resolve_format(&global, &config), OutputFormat::Yaml);
        assert_eq!(
            resolve_format(&global, &Config::default()),
            OutputFormat::Human
        );
    }

    #[test]
    fn test_load_snapshot_missing_file() {
        let err = load_snapshot(Path::new("/nonexistent/idrange_find.json"), None).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
