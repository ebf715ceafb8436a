// tests/property_gating.rs

//! Property coverage over random event sequences against the pure core.

use proptest::prelude::*;

use holdgate_test_utils::harness::CoreHarness;

#[derive(Debug, Clone, Copy)]
enum Op {
    BeginPrimary,
    EndPrimary,
    BeginSecondary,
    EndSecondary,
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::BeginPrimary),
        Just(Op::EndPrimary),
        Just(Op::BeginSecondary),
        Just(Op::EndSecondary),
        Just(Op::Tick),
    ]
}

fn apply(harness: &mut CoreHarness, op: Op) {
    match op {
        Op::BeginPrimary => harness.begin_primary(),
        Op::EndPrimary => harness.end_primary(),
        Op::BeginSecondary => harness.begin_secondary(),
        Op::EndSecondary => harness.end_secondary(),
        // The timer only produces ticks while a subscription is open.
        Op::Tick => {
            if harness.timer_running() {
                harness.tick()
            }
        }
    }
}

proptest! {
    #[test]
    fn engagement_invariants_hold_at_every_step(
        ops in proptest::collection::vec(op_strategy(), 0..200)
    ) {
        let mut harness = CoreHarness::new();

        for &op in &ops {
            apply(&mut harness, op);

            let starts = harness.starts();
            let completions = harness.completions();

            // Completions never exceed starts; at most one engagement open.
            prop_assert!(completions <= starts);
            prop_assert!(starts <= completions + 1);

            // Exactly one timer per engagement, disposed on completion.
            prop_assert_eq!(harness.timers_created(), starts);
            prop_assert_eq!(harness.timers_stopped(), completions);
            prop_assert_eq!(harness.timer_running(), harness.is_engaged());
        }

        // Forwarded tick indices form per-engagement runs 0, 1, 2.
        let indices = harness.tick_indices();
        for (i, &index) in indices.iter().enumerate() {
            prop_assert!(index <= 2);
            if index > 0 {
                prop_assert_eq!(indices[i - 1], index - 1);
            }
        }
        prop_assert!(harness.ticks() <= 3 * harness.starts());
    }

    #[test]
    fn single_signal_sequences_never_engage(
        begins in proptest::collection::vec(any::<bool>(), 0..50)
    ) {
        let mut harness = CoreHarness::new();
        for begin in begins {
            if begin {
                harness.begin_primary();
            } else {
                harness.end_primary();
            }
        }

        prop_assert_eq!(harness.starts(), 0);
        prop_assert_eq!(harness.ticks(), 0);
        prop_assert_eq!(harness.completions(), 0);
        prop_assert_eq!(harness.timers_created(), 0);
    }

    #[test]
    fn replaying_a_sequence_is_deterministic(
        ops in proptest::collection::vec(op_strategy(), 0..100)
    ) {
        let mut first = CoreHarness::new();
        let mut second = CoreHarness::new();

        for &op in &ops {
            apply(&mut first, op);
        }
        for &op in &ops {
            apply(&mut second, op);
        }

        prop_assert_eq!(first.snapshot(), second.snapshot());
        prop_assert_eq!(first.timers_created(), second.timers_created());
        prop_assert_eq!(first.timers_stopped(), second.timers_stopped());
    }
}
