//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Longest accepted name prefix.
pub const MAX_NAME_PREFIX_LEN: usize = 64;

/// Validates merged configuration.
///
/// # Examples
///
/// ```
/// use idrange::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { shift: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.shift == Some(0) {
            return Err(Error::Validation {
                field: "shift".into(),
                message: "Shift must be at least 1".into(),
            });
        }

        if config.default_size == Some(0) {
            return Err(Error::Validation {
                field: "default_size".into(),
                message: "Default size must be greater than 0".into(),
            });
        }

        if let Some(ref prefix) = config.name_prefix {
            Self::validate_name_prefix(prefix)?;
        }

        Ok(())
    }

    /// Validate a generated-name prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty, longer than
    /// [`MAX_NAME_PREFIX_LEN`], or contains characters other than ASCII
    /// alphanumerics, `-` and `_`.
    pub fn validate_name_prefix(prefix: &str) -> Result<()> {
        if prefix.is_empty() {
            return Err(Error::Validation {
                field: "name_prefix".into(),
                message: "Name prefix cannot be empty".into(),
            });
        }

        if prefix.len() > MAX_NAME_PREFIX_LEN {
            return Err(Error::Validation {
                field: "name_prefix".into(),
                message: format!("Name prefix cannot exceed {MAX_NAME_PREFIX_LEN} characters"),
            });
        }

        if let Some(bad) = prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(Error::Validation {
                field: "name_prefix".into(),
                message: format!("Name prefix contains invalid character '{bad}'"),
            });
        }

        Ok(())
    }
}
