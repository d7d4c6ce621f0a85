use bulk_runner::ExecutionPolicy;
use proptest::prelude::*;

/// Strategy for per-record outcomes: `true` succeeds, `false` fails
pub fn outcomes_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..24)
}

/// Strategy for execution policies, without inter-group delays
pub fn policy_strategy() -> impl Strategy<Value = ExecutionPolicy> {
    prop_oneof![
        Just(ExecutionPolicy::Sequential),
        (1usize..8).prop_map(ExecutionPolicy::concurrent),
    ]
}
