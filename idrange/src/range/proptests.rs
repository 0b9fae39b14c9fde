//! Property-based tests for `Window`.

use super::Window;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn window_overlap_symmetric(a in 0u64..10_000, a_len in 1u64..500, b in 0u64..10_000, b_len in 1u64..500) {
        let wa = Window::new(a, a_len).unwrap();
        let wb = Window::new(b, b_len).unwrap();
        prop_assert_eq!(wa.overlaps(&wb), wb.overlaps(&wa));
    }

    // Overlap agrees with a brute-force check over shared identifiers
    #[test]
    fn window_overlap_matches_membership(a in 0u64..300, a_len in 1u64..50, b in 0u64..300, b_len in 1u64..50) {
        let wa = Window::new(a, a_len).unwrap();
        let wb = Window::new(b, b_len).unwrap();
        let shared = (wa.start()..wa.end()).any(|id| wb.contains(id));
        prop_assert_eq!(wa.overlaps(&wb), shared);
    }

    // Adjacent windows never overlap
    #[test]
    fn adjacent_windows_disjoint(start in 0u64..1_000_000, len in 1u64..1000, next_len in 1u64..1000) {
        let first = Window::new(start, len).unwrap();
        let second = Window::new(first.end(), next_len).unwrap();
        prop_assert!(!first.overlaps(&second));
    }

    // Construction fails exactly when the end would overflow
    #[test]
    fn window_overflow_detected(offset in 0u64..100, len in 1u64..200) {
        let start = u64::MAX - offset;
        let result = Window::new(start, len);
        prop_assert_eq!(result.is_ok(), len <= offset);
    }
}
