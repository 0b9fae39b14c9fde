//! Constraint-violation messages the server returns for overlapping ranges.
//!
//! Negative tests force overlapping values through the planner and then
//! compare the server's error text against these strings. The messages are
//! reproduced exactly, punctuation included.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A new range's base ID window overlaps an existing one.
pub const BASE_RANGE_OVERLAP: &str =
    "Constraint violation: New base range overlaps with existing base range.";

/// A new range's primary RID window overlaps an existing one.
pub const PRIMARY_RID_OVERLAP: &str =
    "Constraint violation: New primary rid range overlaps with existing primary rid range.";

/// A new range's secondary RID window overlaps an existing one.
pub const SECONDARY_RID_OVERLAP: &str =
    "Constraint violation: New secondary rid range overlaps with existing secondary rid range.";

/// A range's own primary and secondary RID windows overlap.
pub const PRIMARY_SECONDARY_RID_OVERLAP: &str =
    "invalid 'ID Range setup': Primary RID range and secondary RID range cannot overlap";

/// A modification would strand existing objects outside the range.
pub const DELETE_LEAVES_OBJECTS: &str = "invalid 'ipabaseid,ipaidrangesize': range modification leaving objects with ID out of the defined range is not allowed";

/// The kinds of overlap the server rejects.
///
/// # Examples
///
/// ```
/// use idrange::OverlapKind;
///
/// let kind: OverlapKind = "primary-rid".parse().unwrap();
/// assert!(kind.matches(
///     "Constraint violation: New primary rid range overlaps with existing primary rid range."
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlapKind {
    /// Base ID windows collide.
    BaseRange,
    /// Primary RID windows collide.
    PrimaryRid,
    /// Secondary RID windows collide.
    SecondaryRid,
    /// Primary and secondary RID windows of one range collide.
    PrimarySecondaryRid,
    /// Shrinking or moving a range would strand objects.
    DeleteLeavesObjects,
}

impl OverlapKind {
    const ALL: [Self; 5] = [
        Self::BaseRange,
        Self::PrimaryRid,
        Self::SecondaryRid,
        Self::PrimarySecondaryRid,
        Self::DeleteLeavesObjects,
    ];

    /// Every kind, in a stable order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// The exact message the server returns.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BaseRange => BASE_RANGE_OVERLAP,
            Self::PrimaryRid => PRIMARY_RID_OVERLAP,
            Self::SecondaryRid => SECONDARY_RID_OVERLAP,
            Self::PrimarySecondaryRid => PRIMARY_SECONDARY_RID_OVERLAP,
            Self::DeleteLeavesObjects => DELETE_LEAVES_OBJECTS,
        }
    }

    /// Kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseRange => "base-range",
            Self::PrimaryRid => "primary-rid",
            Self::SecondaryRid => "secondary-rid",
            Self::PrimarySecondaryRid => "primary-secondary-rid",
            Self::DeleteLeavesObjects => "delete-leaves-objects",
        }
    }

    /// Returns `true` if `actual` is exactly this kind's message.
    ///
    /// Surrounding whitespace is ignored; nothing else is.
    #[must_use]
    pub fn matches(self, actual: &str) -> bool {
        actual.trim() == self.message()
    }

    /// Identify the kind a server message belongs to.
    #[must_use]
    pub fn classify(actual: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.matches(actual))
    }
}

impl fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverlapKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::Validation {
                field: "overlap kind".to_string(),
                message: format!(
                    "unknown kind '{s}', expected one of: {}",
                    Self::all()
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}
