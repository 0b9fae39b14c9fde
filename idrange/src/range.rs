//! Identity range types.
//!
//! This module provides the numeric [`Window`] type and the
//! [`IdentityRange`] record describing one range as the directory server
//! reports it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, IdSpace};
use crate::Result;

/// A half-open window of identifiers, `[start, start + size)`.
///
/// A window always holds at least one identifier and never extends past
/// `u64::MAX`.
///
/// # Examples
///
/// ```
/// use idrange::Window;
///
/// let window = Window::new(100, 50).unwrap();
/// assert_eq!(window.end(), 150);
/// assert!(window.contains(149));
/// assert!(!window.contains(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowFields")]
pub struct Window {
    start: u64,
    size: u64,
}

/// Unchecked wire form of a [`Window`]; deserialization goes through
/// [`Window::new`].
#[derive(Deserialize)]
struct WindowFields {
    start: u64,
    size: u64,
}

impl TryFrom<WindowFields> for Window {
    type Error = Error;

    fn try_from(fields: WindowFields) -> Result<Self> {
        Self::new(fields.start, fields.size)
    }
}

impl Window {
    /// Creates a window starting at `start` holding `size` identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `size` is zero and
    /// [`Error::IdSpaceOverflow`] if the window would end past `u64::MAX`.
    pub fn new(start: u64, size: u64) -> Result<Self> {
        Self::in_space(IdSpace::BaseId, start, size)
    }

    /// Like [`Window::new`], but names `space` in an overflow error.
    ///
    /// # Errors
    ///
    /// Same as [`Window::new`].
    pub fn in_space(space: IdSpace, start: u64, size: u64) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid_request("range size must be greater than 0"));
        }
        if start.checked_add(size).is_none() {
            return Err(Error::IdSpaceOverflow {
                space,
                base: start,
                size,
            });
        }
        Ok(Self { start, size })
    }

    /// Returns the first identifier in the window.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Returns the number of identifiers in the window.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns one past the last identifier in the window.
    #[must_use]
    pub const fn end(&self) -> u64 {
        // Constructors reject overflow, so this never saturates.
        self.start.saturating_add(self.size)
    }

    /// Returns `true` if `id` falls inside the window.
    #[must_use]
    pub const fn contains(&self, id: u64) -> bool {
        id >= self.start && id < self.end()
    }

    /// Returns `true` if the two windows share at least one identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::Window;
    ///
    /// let a = Window::new(100, 50).unwrap();
    /// let b = Window::new(149, 10).unwrap();
    /// let c = Window::new(150, 10).unwrap();
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// The range type selector used by the server's range form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeKind {
    /// A locally managed range with primary and secondary RID windows.
    #[serde(rename = "ipa-local")]
    Local,
    /// A range backed by a trusted Active Directory domain.
    #[serde(rename = "ipa-ad-trust")]
    TrustBacked,
}

impl RangeKind {
    /// The radio value the server expects for a local range.
    pub const LOCAL_ID_RANGE: &'static str = "ipa-local";

    /// The radio value the server expects for a trust-backed range.
    pub const TRUSTED_ID_RANGE: &'static str = "ipa-ad-trust";

    /// Returns the radio value submitted for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => Self::LOCAL_ID_RANGE,
            Self::TrustBacked => Self::TRUSTED_ID_RANGE,
        }
    }

    /// Parses a radio value.
    ///
    /// Returns `None` for range types that cannot be requested from the form
    /// (for instance `ipa-ad-trust-posix`).
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::RangeKind;
    ///
    /// assert_eq!(RangeKind::parse("ipa-local"), Some(RangeKind::Local));
    /// assert_eq!(RangeKind::parse("ipa-ad-trust-posix"), None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            Self::LOCAL_ID_RANGE => Some(Self::Local),
            Self::TRUSTED_ID_RANGE => Some(Self::TrustBacked),
            _ => None,
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trusted domain known to the system under test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustDomain(String);

impl TrustDomain {
    /// Wraps a domain name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the domain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An identity range as reported by the directory server.
///
/// The optional fields mirror what the server actually returns: ranges of
/// some types carry no RID windows at all, and trust-backed ranges carry a
/// trusted domain instead of a secondary RID window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRange {
    /// Unique range name (`cn`).
    pub name: String,
    /// First POSIX ID in the range.
    pub base_id: u64,
    /// Number of identifiers in every window of the range.
    pub size: u64,
    /// First primary RID, if the range maps RIDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_rid: Option<u64>,
    /// First secondary RID, for local ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_base_rid: Option<u64>,
    /// Trusted domain name, for trust-backed ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_domain: Option<String>,
    /// Raw range type reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_type: Option<String>,
}

impl IdentityRange {
    /// Creates a range with only a base ID window.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::IdentityRange;
    ///
    /// let range = IdentityRange::new("EXAMPLE.TEST_id_range", 1000, 50)
    ///     .with_base_rid(2000);
    /// assert_eq!(range.id_window().unwrap().end(), 1050);
    /// assert_eq!(range.rid_end(), Some(2050));
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, base_id: u64, size: u64) -> Self {
        Self {
            name: name.into(),
            base_id,
            size,
            base_rid: None,
            secondary_base_rid: None,
            trust_domain: None,
            range_type: None,
        }
    }

    /// Sets the primary RID start.
    #[must_use]
    pub fn with_base_rid(mut self, base_rid: u64) -> Self {
        self.base_rid = Some(base_rid);
        self
    }

    /// Sets the secondary RID start.
    #[must_use]
    pub fn with_secondary_base_rid(mut self, secondary_base_rid: u64) -> Self {
        self.secondary_base_rid = Some(secondary_base_rid);
        self
    }

    /// Sets the trusted domain.
    #[must_use]
    pub fn with_trust_domain(mut self, domain: impl Into<String>) -> Self {
        self.trust_domain = Some(domain.into());
        self
    }

    /// Sets the raw range type.
    #[must_use]
    pub fn with_range_type(mut self, range_type: impl Into<String>) -> Self {
        self.range_type = Some(range_type.into());
        self
    }

    /// Returns the base ID window.
    ///
    /// # Errors
    ///
    /// Returns an error if the range has size 0 or ends past `u64::MAX`.
    pub fn id_window(&self) -> Result<Window> {
        Window::in_space(IdSpace::BaseId, self.base_id, self.size)
    }

    /// Returns the primary RID window, if the range has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or overflows.
    pub fn primary_rid_window(&self) -> Result<Option<Window>> {
        self.base_rid
            .map(|rid| Window::in_space(IdSpace::PrimaryRid, rid, self.size))
            .transpose()
    }

    /// Returns the secondary RID window, if the range has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is empty or overflows.
    pub fn secondary_rid_window(&self) -> Result<Option<Window>> {
        self.secondary_base_rid
            .map(|rid| Window::in_space(IdSpace::SecondaryRid, rid, self.size))
            .transpose()
    }

    /// One past the highest RID this range uses in either RID window.
    ///
    /// The secondary window only counts when a primary window exists, which
    /// matches how the server lays out local ranges. Saturates rather than
    /// overflowing.
    #[must_use]
    pub fn rid_end(&self) -> Option<u64> {
        let base_rid = self.base_rid?;
        let start = match self.secondary_base_rid {
            Some(secondary) => base_rid.max(secondary),
            None => base_rid,
        };
        Some(start.saturating_add(self.size))
    }

    /// Returns `true` if this range is associated with a trusted domain.
    #[must_use]
    pub fn is_trust_backed(&self) -> bool {
        self.trust_domain.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_validation() {
        assert!(Window::new(0, 1).is_ok());
        assert!(Window::new(100, 0).is_err());
        assert!(Window::new(u64::MAX - 10, 10).is_ok());

        let err = Window::in_space(IdSpace::PrimaryRid, u64::MAX - 10, 11).unwrap_err();
        assert!(matches!(
            err,
            Error::IdSpaceOverflow {
                space: IdSpace::PrimaryRid,
                ..
            }
        ));
    }

    #[test]
    fn test_window_bounds() {
        let window = Window::new(100, 50).unwrap();
        assert_eq!(window.start(), 100);
        assert_eq!(window.size(), 50);
        assert_eq!(window.end(), 150);
        assert!(window.contains(100));
        assert!(!window.contains(99));
        assert!(!window.contains(150));
    }

    #[test]
    fn test_window_overlaps_is_symmetric() {
        let a = Window::new(100, 50).unwrap();
        let b = Window::new(120, 100).unwrap();
        let c = Window::new(150, 1).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_window_deserialize_validates() {
        let window: Window = serde_json::from_str(r#"{"start":100,"size":50}"#).unwrap();
        assert_eq!(window.end(), 150);

        let overflow = serde_json::from_str::<Window>(r#"{"start":18446744073709551615,"size":5}"#);
        assert!(overflow.unwrap_err().to_string().contains("overflows"));

        let empty = serde_json::from_str::<Window>(r#"{"start":100,"size":0}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn test_window_end_at_top_of_space() {
        let window = Window::new(u64::MAX - 1, 1).unwrap();
        assert_eq!(window.end(), u64::MAX);
        assert!(window.contains(u64::MAX - 1));
    }

    #[test]
    fn test_window_display() {
        let window = Window::new(100, 50).unwrap();
        assert_eq!(format!("{window}"), "[100, 150)");
    }

    #[test]
    fn test_range_kind_round_trip() {
        assert_eq!(RangeKind::Local.as_str(), "ipa-local");
        assert_eq!(RangeKind::TrustBacked.as_str(), "ipa-ad-trust");
        assert_eq!(RangeKind::parse("ipa-ad-trust"), Some(RangeKind::TrustBacked));
        assert_eq!(RangeKind::parse("bogus"), None);
    }

    #[test]
    fn test_range_kind_serde() {
        let json = serde_json::to_string(&RangeKind::TrustBacked).unwrap();
        assert_eq!(json, "\"ipa-ad-trust\"");
    }

    #[test]
    fn test_rid_end_uses_highest_rid_window() {
        let plain = IdentityRange::new("r", 0, 50);
        assert_eq!(plain.rid_end(), None);

        let primary_only = IdentityRange::new("r", 0, 50).with_base_rid(2000);
        assert_eq!(primary_only.rid_end(), Some(2050));

        let secondary_higher = IdentityRange::new("r", 0, 50)
            .with_base_rid(1000)
            .with_secondary_base_rid(5000);
        assert_eq!(secondary_higher.rid_end(), Some(5050));

        let primary_higher = IdentityRange::new("r", 0, 50)
            .with_base_rid(9000)
            .with_secondary_base_rid(5000);
        assert_eq!(primary_higher.rid_end(), Some(9050));
    }

    #[test]
    fn test_secondary_without_primary_is_ignored_for_rid_end() {
        let range = IdentityRange::new("r", 0, 50).with_secondary_base_rid(5000);
        assert_eq!(range.rid_end(), None);
    }

    #[test]
    fn test_range_windows() {
        let range = IdentityRange::new("r", 1000, 50)
            .with_base_rid(2000)
            .with_secondary_base_rid(3000);
        assert_eq!(range.id_window().unwrap(), Window::new(1000, 50).unwrap());
        assert_eq!(
            range.primary_rid_window().unwrap(),
            Some(Window::new(2000, 50).unwrap())
        );
        assert_eq!(
            range.secondary_rid_window().unwrap(),
            Some(Window::new(3000, 50).unwrap())
        );
        assert!(!range.is_trust_backed());
    }

    #[test]
    fn test_trust_domain_display() {
        let domain = TrustDomain::new("ad.example.test");
        assert_eq!(domain.name(), "ad.example.test");
        assert_eq!(format!("{domain}"), "ad.example.test");
    }
}

#[cfg(test)]
mod proptests;
