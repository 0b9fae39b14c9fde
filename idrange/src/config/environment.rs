//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `IDRANGE_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Overrides the gap between a mark and the next window.
pub const ENV_SHIFT: &str = "IDRANGE_SHIFT";
/// Overrides the safety margin above existing ranges.
pub const ENV_MARGIN: &str = "IDRANGE_MARGIN";
/// Overrides the default range size.
pub const ENV_DEFAULT_SIZE: &str = "IDRANGE_DEFAULT_SIZE";
/// Overrides the generated name prefix.
pub const ENV_NAME_PREFIX: &str = "IDRANGE_NAME_PREFIX";
/// Overrides the CLI output format.
pub const ENV_OUTPUT_FORMAT: &str = "IDRANGE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use idrange::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `IDRANGE_*` environment variables to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is not an unsigned integer or
    /// the output format is unknown.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(value) = env::var(ENV_SHIFT) {
            config.shift = Some(Self::parse_u64(ENV_SHIFT, &value)?);
        }

        if let Ok(value) = env::var(ENV_MARGIN) {
            config.margin = Some(Self::parse_u64(ENV_MARGIN, &value)?);
        }

        if let Ok(value) = env::var(ENV_DEFAULT_SIZE) {
            config.default_size = Some(Self::parse_u64(ENV_DEFAULT_SIZE, &value)?);
        }

        if let Ok(prefix) = env::var(ENV_NAME_PREFIX) {
            config.name_prefix = Some(prefix);
        }

        if let Ok(value) = env::var(ENV_OUTPUT_FORMAT) {
            config.output_format =
                Some(value.parse::<OutputFormat>().map_err(|_| Error::Validation {
                    field: ENV_OUTPUT_FORMAT.into(),
                    message: format!("Unknown output format '{value}'"),
                })?);
        }

        Ok(())
    }

    fn parse_u64(var: &str, value: &str) -> Result<u64> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: var.into(),
            message: "Must be a non-negative integer".into(),
        })
    }
}
