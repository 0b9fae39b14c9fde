//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; unset
//! fields fall back to the allocation defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use idrange::config::Config;
///
/// let config: Config = serde_yaml::from_str("shift: 250\nname_prefix: ci-range\n").unwrap();
/// assert_eq!(config.shift, Some(250));
/// assert_eq!(config.margin, None);
///
/// assert!(serde_yaml::from_str::<Config>("ports: 5\n").is_err());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Gap between a high-water mark and the next derived window.
    pub shift: Option<u64>,

    /// Safety margin added above existing ranges.
    pub margin: Option<u64>,

    /// Range size when a request does not name one.
    pub default_size: Option<u64>,

    /// Prefix of generated range names.
    pub name_prefix: Option<String>,

    /// Output format for CLI commands.
    pub output_format: Option<OutputFormat>,
}

/// Output format for rendered fixtures, marks and messages.
///
/// # Examples
///
/// ```
/// use idrange::config::OutputFormat;
///
/// let format: OutputFormat = "yaml".parse().unwrap();
/// assert_eq!(format, OutputFormat::Yaml);
/// assert_eq!(format.to_string(), "yaml");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
    /// Aligned text for people.
    #[default]
    Human,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Human => write!(f, "human"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "human" => Ok(Self::Human),
            _ => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("unknown format '{s}', expected json, yaml or human"),
            }),
        }
    }
}
