use std::sync::Arc;

use dunefield::desert_tileset::DesertTileset;
use proptest::prelude::*;
use wfc_core::{StepResult, WfcConfig, WfcRunner};

fn config(seed: u64) -> WfcConfig {
    WfcConfig {
        width: 8,
        height: 8,
        rng_seed: seed,
        restarts_left: 50,
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_seed_is_deterministic(seed in any::<u64>()) {
        let tileset = Arc::new(DesertTileset::default());
        let mut a = WfcRunner::new(tileset.clone(), config(seed)).unwrap();
        let mut b = WfcRunner::new(tileset, config(seed)).unwrap();

        prop_assert_eq!(a.run(), b.run());
        prop_assert_eq!(a.generation(), b.generation());
        prop_assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn candidate_sets_only_shrink_between_restarts(seed in any::<u64>()) {
        let tileset = Arc::new(DesertTileset::default());
        let mut runner = WfcRunner::new(tileset, config(seed)).unwrap();

        let mut previous = runner.grid().clone();
        let mut generation = runner.generation();
        for _ in 0..10_000 {
            match runner.step() {
                StepResult::Complete => break,
                StepResult::Restarted => {
                    prop_assert_eq!(runner.generation(), generation + 1);
                    generation += 1;
                }
                StepResult::Collapsed { .. } => {
                    for ((x, y), cell) in runner.grid().iter() {
                        let before = previous.get(x, y);
                        prop_assert!(
                            cell.is_subset_of(&before),
                            "cell ({}, {}) regained candidates", x, y
                        );
                    }
                }
            }
            previous = runner.grid().clone();
        }
    }
}
