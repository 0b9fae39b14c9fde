//! Property-based tests for the allocation planner.
//!
//! These verify the non-collision guarantees for windows the planner derives
//! itself, across random request sequences and starting marks.

use super::{AllocationPlanner, AllocationPolicy, AllocationRequest};
use crate::range::Window;
use crate::watermark::HighWaterMark;
use proptest::prelude::*;

/// Strategy for a request with no forced values.
fn implicit_request_strategy() -> impl Strategy<Value = AllocationRequest> {
    (1u64..10_000, any::<bool>()).prop_map(|(size, trusted)| {
        let request = if trusted {
            AllocationRequest::trust_backed("ad.example.test")
        } else {
            AllocationRequest::local()
        };
        request.with_size(size)
    })
}

/// Strategy for a starting mark well inside the identifier space.
fn mark_strategy() -> impl Strategy<Value = HighWaterMark> {
    (0u64..1u64 << 40, 0u64..1u64 << 40, 0u64..1u64 << 40).prop_map(|(id, rid, secondary)| {
        HighWaterMark {
            max_base_id: id,
            max_primary_rid: rid,
            max_secondary_rid: secondary,
        }
    })
}

fn pairwise_disjoint(windows: &[Window]) -> bool {
    windows
        .iter()
        .enumerate()
        .all(|(i, a)| windows[i + 1..].iter().all(|b| !a.overlaps(b)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Base ID windows of implicit plans never collide
    #[test]
    fn base_id_windows_disjoint(
        mark in mark_strategy(),
        requests in proptest::collection::vec(implicit_request_strategy(), 1..30),
    ) {
        let mut planner = AllocationPlanner::new(mark, AllocationPolicy::default());
        let windows: Vec<Window> = requests
            .iter()
            .map(|r| planner.plan(r).unwrap().id_window())
            .collect();
        prop_assert!(pairwise_disjoint(&windows));
    }

    // Every derived RID window, primary or secondary, is disjoint from every other
    #[test]
    fn rid_windows_disjoint(
        mark in mark_strategy(),
        requests in proptest::collection::vec(implicit_request_strategy(), 1..30),
    ) {
        let mut planner = AllocationPlanner::new(mark, AllocationPolicy::default());
        let mut windows = Vec::new();
        for request in &requests {
            let plan = planner.plan(request).unwrap();
            prop_assert!(!plan.has_self_overlap());
            windows.push(plan.primary_rid_window());
            windows.extend(plan.secondary_rid_window());
        }
        prop_assert!(pairwise_disjoint(&windows));
    }

    // Derived windows always start above the starting mark
    #[test]
    fn windows_start_above_mark(
        mark in mark_strategy(),
        request in implicit_request_strategy(),
    ) {
        let mut planner = AllocationPlanner::new(mark, AllocationPolicy::default());
        let plan = planner.plan(&request).unwrap();
        prop_assert!(plan.base_id() > mark.max_base_id);
        prop_assert!(plan.base_rid() > mark.max_primary_rid);
    }

    // The mark never moves backwards, even around forced values
    #[test]
    fn mark_never_decreases(
        mark in mark_strategy(),
        forced_base in 0u64..1u64 << 40,
        size in 1u64..10_000,
    ) {
        let mut planner = AllocationPlanner::new(mark, AllocationPolicy::default());
        planner
            .plan(&AllocationRequest::local().with_base_id(forced_base).with_size(size))
            .unwrap();
        let after = planner.mark();
        prop_assert!(after.max_base_id >= mark.max_base_id);
        prop_assert!(after.max_primary_rid >= mark.max_primary_rid);
        prop_assert!(after.max_secondary_rid >= mark.max_secondary_rid);
    }
}
