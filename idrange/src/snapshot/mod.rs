//! Point-in-time view of the ranges and trusts on the system under test.
//!
//! A [`RangeSnapshot`] is captured once per test run through a
//! [`RangeSource`] and then handed to the high-water tracker. It holds no
//! connection to the server after capture.
//!
//! # Examples
//!
//! ```
//! use idrange::snapshot::{RangeSnapshot, StaticSource};
//! use idrange::{IdentityRange, TrustDomain};
//!
//! let source = StaticSource::new(
//!     vec![IdentityRange::new("r1", 1000, 50).with_base_rid(2000)],
//!     vec![TrustDomain::new("ad.example.test")],
//! );
//!
//! let snapshot = RangeSnapshot::capture(&source).unwrap();
//! assert_eq!(snapshot.ranges().len(), 1);
//! assert_eq!(snapshot.first_trust_domain().unwrap().name(), "ad.example.test");
//! ```

pub mod response;
pub mod source;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::range::{IdentityRange, TrustDomain};
use crate::Result;

#[cfg(test)]
pub use source::MockRangeSource;
pub use source::{RangeSource, RecordedResponses, StaticSource};

/// Ranges and trusts read from the system under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSnapshot {
    ranges: Vec<IdentityRange>,
    trust_domains: Vec<TrustDomain>,
    captured_at: DateTime<Utc>,
}

impl RangeSnapshot {
    /// Query `source` for all ranges and all trusts.
    ///
    /// Ranges are fetched first. Nothing is retried: the first failure is
    /// returned to the caller.
    ///
    /// # Errors
    ///
    /// Propagates the [`Error::QueryFailure`](crate::Error::QueryFailure)
    /// reported by either query.
    pub fn capture<S: RangeSource + ?Sized>(source: &S) -> Result<Self> {
        let ranges = source.fetch_ranges()?;
        let trust_domains = source.fetch_trust_domains()?;
        log::debug!(
            "captured snapshot with {} range(s) and {} trust(s)",
            ranges.len(),
            trust_domains.len()
        );
        Ok(Self::new(ranges, trust_domains))
    }

    /// Build a snapshot from data already at hand, stamped with the current time.
    #[must_use]
    pub fn new(ranges: Vec<IdentityRange>, trust_domains: Vec<TrustDomain>) -> Self {
        Self {
            ranges,
            trust_domains,
            captured_at: Utc::now(),
        }
    }

    /// An empty snapshot: no ranges and no trusts.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Returns the captured ranges.
    #[must_use]
    pub fn ranges(&self) -> &[IdentityRange] {
        &self.ranges
    }

    /// Returns the captured trusts.
    #[must_use]
    pub fn trust_domains(&self) -> &[TrustDomain] {
        &self.trust_domains
    }

    /// Returns the first trust, the default target for trust-backed ranges.
    #[must_use]
    pub fn first_trust_domain(&self) -> Option<&TrustDomain> {
        self.trust_domains.first()
    }

    /// Returns `true` if at least one trust exists.
    #[must_use]
    pub fn has_trusts(&self) -> bool {
        !self.trust_domains.is_empty()
    }

    /// Returns when the snapshot was taken.
    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Looks up a captured range by name.
    #[must_use]
    pub fn find_range(&self, name: &str) -> Option<&IdentityRange> {
        self.ranges.iter().find(|range| range.name == name)
    }
}
