//! Property-based tests for fixture serialization.

use super::{FieldAssignment, FixtureBuilder, FormField, ModifyRequest};
use crate::planner::{AllocationPlan, AllocationPlanner, AllocationPolicy, AllocationRequest};
use crate::watermark::HighWaterMark;
use proptest::prelude::*;

fn request_strategy() -> impl Strategy<Value = AllocationRequest> {
    (
        1u64..100_000,
        any::<bool>(),
        proptest::option::of(0u64..1u64 << 32),
        proptest::option::of(0u64..1u64 << 32),
        "[a-z]{2,10}\\.test",
    )
        .prop_map(|(size, trusted, base_id, base_rid, domain)| {
            let mut request = if trusted {
                AllocationRequest::trust_backed(domain)
            } else {
                AllocationRequest::local()
            };
            request = request.with_size(size);
            if let Some(base_id) = base_id {
                request = request.with_base_id(base_id);
            }
            if let Some(base_rid) = base_rid {
                request = request.with_base_rid(base_rid);
            }
            request
        })
}

fn plan_of(request: &AllocationRequest) -> AllocationPlan {
    AllocationPlanner::new(HighWaterMark::default(), AllocationPolicy::default())
        .plan(request)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 300,
        .. ProptestConfig::default()
    })]

    // The add sequence carries enough to rebuild the plan
    #[test]
    fn add_sequence_rebuilds_plan(request in request_strategy()) {
        let plan = plan_of(&request);
        let rebuilt = AllocationPlan::from_add_sequence(&FixtureBuilder::add_sequence(&plan)).unwrap();
        prop_assert_eq!(rebuilt, plan);
    }

    // Building twice from the same plan yields the same sequence
    #[test]
    fn add_sequence_is_deterministic(request in request_strategy()) {
        let plan = plan_of(&request);
        prop_assert_eq!(FixtureBuilder::add_sequence(&plan), FixtureBuilder::add_sequence(&plan));
    }

    // The conditional field always comes after the type selector and callback
    #[test]
    fn conditional_field_is_last(request in request_strategy()) {
        let plan = plan_of(&request);
        let fields = FixtureBuilder::add_sequence(&plan);
        let radio = fields.iter().position(|f| f.field() == Some(FormField::RangeType)).unwrap();
        let callback = fields.iter().position(|f| matches!(f, FieldAssignment::Callback { .. })).unwrap();
        prop_assert_eq!(callback, radio + 1);
        prop_assert_eq!(fields.len(), radio + 3);
    }

    // Modify sequences emit exactly the fields that are set
    #[test]
    fn modify_sequence_is_sparse(
        base_id in proptest::option::of(any::<u64>()),
        size in proptest::option::of(any::<u64>()),
        base_rid in proptest::option::of(any::<u64>()),
        secondary in proptest::option::of(any::<u64>()),
    ) {
        let request = ModifyRequest { base_id, size, base_rid, secondary_base_rid: secondary };
        let expected = [base_id, size, base_rid, secondary].iter().filter(|v| v.is_some()).count();
        prop_assert_eq!(FixtureBuilder::modify_sequence(&request).len(), expected);
    }
}
