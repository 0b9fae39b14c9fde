//! Query sources for existing ranges and trusts.
//!
//! This module defines the [`RangeSource`] trait the snapshot is read
//! through, plus two implementations that do not talk to a live server:
//! an in-memory source and a source that replays recorded API responses.

use std::fs;
use std::path::Path;

use crate::range::{IdentityRange, TrustDomain};
use crate::Result;

use super::response::{self, IDRANGE_FIND, TRUST_FIND};

/// Read-only queries against the identity-range API of the system under test.
///
/// The trait abstracts the transport so the UI driver, a recorded response,
/// or a test double can provide the data. Implementations report every
/// failure, transport or decoding, as [`Error::QueryFailure`](crate::Error::QueryFailure).
///
/// # Examples
///
/// ```
/// use idrange::snapshot::{RangeSource, StaticSource};
/// use idrange::IdentityRange;
///
/// let source = StaticSource::new(vec![IdentityRange::new("r1", 1000, 50)], vec![]);
/// assert_eq!(source.fetch_ranges().unwrap().len(), 1);
/// assert!(source.fetch_trust_domains().unwrap().is_empty());
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait RangeSource {
    /// Fetch every identity range currently defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryFailure`](crate::Error::QueryFailure) if the
    /// query cannot complete or its response cannot be decoded.
    fn fetch_ranges(&self) -> Result<Vec<IdentityRange>>;

    /// Fetch every trusted domain currently defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryFailure`](crate::Error::QueryFailure) if the
    /// query cannot complete or its response cannot be decoded.
    fn fetch_trust_domains(&self) -> Result<Vec<TrustDomain>>;
}

/// An in-memory source returning fixed data.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    ranges: Vec<IdentityRange>,
    trust_domains: Vec<TrustDomain>,
}

impl StaticSource {
    /// Create a source that always returns the given ranges and trusts.
    #[must_use]
    pub fn new(ranges: Vec<IdentityRange>, trust_domains: Vec<TrustDomain>) -> Self {
        Self {
            ranges,
            trust_domains,
        }
    }
}

impl RangeSource for StaticSource {
    fn fetch_ranges(&self) -> Result<Vec<IdentityRange>> {
        Ok(self.ranges.clone())
    }

    fn fetch_trust_domains(&self) -> Result<Vec<TrustDomain>> {
        Ok(self.trust_domains.clone())
    }
}

/// Replays recorded `idrange_find` / `trust_find` JSON responses.
///
/// The documents are kept as raw text and decoded on every fetch, so a
/// malformed recording surfaces as a query failure at the same point a
/// malformed live response would.
///
/// # Examples
///
/// ```
/// use idrange::snapshot::{RangeSource, RecordedResponses};
///
/// let ranges = r#"{"result": {"result": [
///     {"cn": ["r1"], "ipabaseid": ["1000"], "ipaidrangesize": ["50"]}
/// ]}}"#;
/// let source = RecordedResponses::new(ranges, None);
///
/// let fetched = source.fetch_ranges().unwrap();
/// assert_eq!(fetched[0].base_id, 1000);
/// assert!(source.fetch_trust_domains().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RecordedResponses {
    ranges: String,
    trusts: Option<String>,
}

impl RecordedResponses {
    /// Create a source from response documents already in memory.
    ///
    /// A missing trust document means the system has no trusts.
    #[must_use]
    pub fn new(ranges: impl Into<String>, trusts: Option<String>) -> Self {
        Self {
            ranges: ranges.into(),
            trusts,
        }
    }

    /// Load recorded responses from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if either file cannot be read.
    pub fn from_files(ranges: &Path, trusts: Option<&Path>) -> Result<Self> {
        let ranges = fs::read_to_string(ranges)?;
        let trusts = trusts.map(fs::read_to_string).transpose()?;
        Ok(Self::new(ranges, trusts))
    }
}

impl RangeSource for RecordedResponses {
    fn fetch_ranges(&self) -> Result<Vec<IdentityRange>> {
        let document = response::parse_document(IDRANGE_FIND, &self.ranges)?;
        response::decode_ranges(&document)
    }

    fn fetch_trust_domains(&self) -> Result<Vec<TrustDomain>> {
        match &self.trusts {
            Some(text) => {
                let document = response::parse_document(TRUST_FIND, text)?;
                response::decode_trust_domains(&document)
            }
            None => Ok(Vec::new()),
        }
    }
}
