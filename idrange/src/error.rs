//! Error types for the idrange library.
//!
//! This module provides the error hierarchy shared by every stage of the
//! allocation pipeline, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with an idrange error.
///
/// # Examples
///
/// ```
/// use idrange::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(100)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the idrange library.
#[derive(Debug, Error)]
pub enum Error {
    /// A query against the system under test could not complete.
    ///
    /// Covers transport failures reported by a [`RangeSource`](crate::RangeSource)
    /// as well as responses that cannot be decoded.
    #[error("{operation} query failed: {reason}")]
    QueryFailure {
        /// The query that failed (e.g. `idrange_find`).
        operation: String,
        /// Why the query failed.
        reason: String,
    },

    /// An allocation request combines mutually exclusive settings.
    #[error("invalid allocation request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected.
        reason: String,
    },

    /// A window would extend past the end of the identifier space.
    #[error("{space} window starting at {base} with size {size} overflows the identifier space")]
    IdSpaceOverflow {
        /// The numeric space being allocated.
        space: IdSpace,
        /// The start of the window.
        base: u64,
        /// The requested window size.
        size: u64,
    },

    /// A form field was built or decoded inconsistently.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// The form field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three numeric spaces an identity range occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdSpace {
    /// The POSIX ID space (`ipabaseid`).
    BaseId,
    /// The primary relative-identifier space (`ipabaserid`).
    PrimaryRid,
    /// The secondary relative-identifier space (`ipasecondarybaserid`).
    SecondaryRid,
}

impl std::fmt::Display for IdSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaseId => write!(f, "base ID"),
            Self::PrimaryRid => write!(f, "primary RID"),
            Self::SecondaryRid => write!(f, "secondary RID"),
        }
    }
}

impl Error {
    /// Shorthand for a [`Error::QueryFailure`].
    pub(crate) fn query(operation: &str, reason: impl Into<String>) -> Self {
        Self::QueryFailure {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`Error::InvalidRequest`].
    pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Check if error came from querying the system under test.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::Error;
    ///
    /// let err = Error::QueryFailure {
    ///     operation: "trust_find".to_string(),
    ///     reason: "connection refused".to_string(),
    /// };
    /// assert!(err.is_query_failure());
    /// ```
    #[must_use]
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailure { .. })
    }

    /// Check if error rejected an allocation request.
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}
