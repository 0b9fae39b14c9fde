//! High-water marks over the three identifier spaces.
//!
//! The tracker folds every existing range into a [`HighWaterMark`]: for each
//! space, one past the highest endpoint seen plus a safety margin. New
//! windows are then drawn above the marks, clear of anything that exists.

use serde::{Deserialize, Serialize};

use crate::range::IdentityRange;
use crate::snapshot::RangeSnapshot;

/// Distance kept between existing ranges and the first new allocation.
pub const DEFAULT_MARGIN: u64 = 1_000_000;

/// Highest identifiers in use, plus margin, per numeric space.
///
/// Marks only ever move forward. They live in memory for one test run and
/// are never written back to the server.
///
/// # Examples
///
/// ```
/// use idrange::{HighWaterMark, IdentityRange};
///
/// let ranges = [IdentityRange::new("r1", 1000, 50).with_base_rid(2000)];
/// let mark = HighWaterMark::from_ranges(&ranges);
///
/// assert_eq!(mark.max_base_id, 1_001_050);
/// assert_eq!(mark.max_primary_rid, 1_002_050);
/// assert_eq!(mark.max_secondary_rid, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighWaterMark {
    /// Mark in the base ID space.
    pub max_base_id: u64,
    /// Mark in the primary RID space; also the running mark new secondary
    /// RID windows are drawn from.
    pub max_primary_rid: u64,
    /// Mark over ranges that have a secondary RID window.
    pub max_secondary_rid: u64,
}

impl HighWaterMark {
    /// Compute marks for a snapshot using [`DEFAULT_MARGIN`].
    #[must_use]
    pub fn compute(snapshot: &RangeSnapshot) -> Self {
        Self::compute_with_margin(snapshot, DEFAULT_MARGIN)
    }

    /// Compute marks for a snapshot with an explicit margin.
    #[must_use]
    pub fn compute_with_margin(snapshot: &RangeSnapshot, margin: u64) -> Self {
        let mark = Self::from_ranges_with_margin(snapshot.ranges(), margin);
        log::debug!(
            "high-water marks from {} range(s): base ID {}, primary RID {}, secondary RID {}",
            snapshot.ranges().len(),
            mark.max_base_id,
            mark.max_primary_rid,
            mark.max_secondary_rid
        );
        mark
    }

    /// Compute marks for a slice of ranges using [`DEFAULT_MARGIN`].
    #[must_use]
    pub fn from_ranges(ranges: &[IdentityRange]) -> Self {
        Self::from_ranges_with_margin(ranges, DEFAULT_MARGIN)
    }

    /// Compute marks for a slice of ranges with an explicit margin.
    #[must_use]
    pub fn from_ranges_with_margin(ranges: &[IdentityRange], margin: u64) -> Self {
        ranges.iter().fold(Self::default(), |mut mark, range| {
            mark.observe(range, margin);
            mark
        })
    }

    /// Fold one existing range into the marks.
    ///
    /// A mark only moves when the range ends strictly above it, and then
    /// jumps to that end plus `margin`. The margin is not cumulative: a range
    /// ending inside an earlier margin leaves the mark alone.
    pub fn observe(&mut self, range: &IdentityRange, margin: u64) {
        let id_end = range.base_id.saturating_add(range.size);
        raise(&mut self.max_base_id, id_end, margin);

        if let Some(rid_end) = range.rid_end() {
            raise(&mut self.max_primary_rid, rid_end, margin);
            if range.secondary_base_rid.is_some() {
                raise(&mut self.max_secondary_rid, rid_end, margin);
            }
        }
    }
}

fn raise(mark: &mut u64, end: u64, margin: u64) {
    if *mark < end {
        *mark = end.saturating_add(margin);
    }
}


#[cfg(test)]
mod proptests;
