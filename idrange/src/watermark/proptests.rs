//! Property-based tests for high-water mark computation.

use super::{HighWaterMark, DEFAULT_MARGIN};
use crate::range::IdentityRange;
use proptest::prelude::*;

/// Strategy for ranges of any of the three shapes the server reports.
fn range_strategy() -> impl Strategy<Value = IdentityRange> {
    (
        0u64..100_000_000,
        1u64..500_000,
        proptest::option::of(0u64..100_000_000),
        proptest::option::of(0u64..100_000_000),
    )
        .prop_map(|(base_id, size, base_rid, secondary)| {
            let mut range = IdentityRange::new("r", base_id, size);
            range.base_rid = base_rid;
            range.secondary_base_rid = secondary;
            range
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Folding in another range never lowers any mark
    #[test]
    fn marks_non_decreasing(ranges in proptest::collection::vec(range_strategy(), 0..20)) {
        let mut mark = HighWaterMark::default();
        for range in &ranges {
            let before = mark;
            mark.observe(range, DEFAULT_MARGIN);
            prop_assert!(mark.max_base_id >= before.max_base_id);
            prop_assert!(mark.max_primary_rid >= before.max_primary_rid);
            prop_assert!(mark.max_secondary_rid >= before.max_secondary_rid);
        }
    }

    // Every existing window ends at or below the mark of its space
    #[test]
    fn marks_cover_every_range(ranges in proptest::collection::vec(range_strategy(), 1..20)) {
        let mark = HighWaterMark::from_ranges(&ranges);
        for range in &ranges {
            prop_assert!(range.base_id + range.size <= mark.max_base_id);
            if let Some(rid_end) = range.rid_end() {
                prop_assert!(rid_end <= mark.max_primary_rid);
            }
        }
    }

    // The primary mark dominates every RID window, secondary ones included
    #[test]
    fn primary_mark_covers_secondary_windows(ranges in proptest::collection::vec(range_strategy(), 1..20)) {
        let mark = HighWaterMark::from_ranges(&ranges);
        for range in ranges.iter().filter(|r| r.base_rid.is_some()) {
            if let Some(secondary) = range.secondary_base_rid {
                prop_assert!(secondary + range.size <= mark.max_primary_rid);
            }
        }
    }

    // The first range folded in always gets the full margin above it
    #[test]
    fn first_range_gets_full_margin(ranges in proptest::collection::vec(range_strategy(), 1..20)) {
        let mark = HighWaterMark::from_ranges(&ranges);
        prop_assert!(mark.max_base_id >= ranges[0].base_id + ranges[0].size + DEFAULT_MARGIN);
    }
}
