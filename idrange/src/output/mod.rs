//! Output formatting for fixtures, high-water marks and overlap messages.
//!
//! JSON and YAML go through serde; the human format is an aligned text
//! listing meant for a terminal.

mod formatters;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::fixture::FixtureData;
use crate::overlap::OverlapKind;
use crate::watermark::HighWaterMark;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter, YamlFormatter};

/// Renders pipeline results in one output format.
pub trait OutputFormatter {
    /// Format the fixtures for a batch of planned ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_fixtures(&self, fixtures: &[FixtureData]) -> Result<String>;

    /// Format the high-water marks.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_mark(&self, mark: &HighWaterMark) -> Result<String>;

    /// Format the expected server messages for `kinds`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_messages(&self, kinds: &[OverlapKind]) -> Result<String>;
}

/// One overlap message as emitted by the structured formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    /// Kebab-case kind name.
    pub kind: &'static str,
    /// The server's message.
    pub message: &'static str,
}

impl From<OverlapKind> for MessageEntry {
    fn from(kind: OverlapKind) -> Self {
        Self {
            kind: kind.name(),
            message: kind.message(),
        }
    }
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::config::OutputFormat;
    /// use idrange::HighWaterMark;
    ///
    /// let out = OutputFormat::Json.create_formatter().format_mark(&HighWaterMark::default()).unwrap();
    /// assert!(out.contains("\"max_base_id\": 0"));
    /// ```
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Human => Box::new(HumanFormatter),
        }
    }
}
