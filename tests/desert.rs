use std::sync::Arc;

use dunefield::desert_tileset::{DesertTileset, TILE_COUNT, TILE_GLYPHS};
use wfc_core::{Propagation, StepResult, WfcConfig, WfcRunner};

fn config(seed: u64) -> WfcConfig {
    WfcConfig {
        width: 12,
        height: 12,
        rng_seed: seed,
        propagation: Propagation::Full,
        ..Default::default()
    }
}

#[test]
fn desert_runs_are_reproducible() {
    let tileset = Arc::new(DesertTileset::default());
    let mut a = WfcRunner::new(tileset.clone(), config(99)).unwrap();
    let mut b = WfcRunner::new(tileset, config(99)).unwrap();

    assert_eq!(a.seed_point(), b.seed_point());
    assert_eq!(a.run(), b.run());
    assert_eq!(a.generation(), b.generation());
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn stepping_reports_in_bounds_collapses() {
    let tileset = Arc::new(DesertTileset::default());
    let mut runner = WfcRunner::new(tileset, config(7)).unwrap();

    for _ in 0..10_000 {
        match runner.step() {
            StepResult::Complete => break,
            StepResult::Restarted => {}
            StepResult::Collapsed { x, y, tile } => {
                assert!(x < 12 && y < 12);
                assert!(tile < TILE_COUNT);
                assert_eq!(runner.grid().get(x, y).collapsed(), Some(tile));
            }
        }
    }
}

#[test]
fn tile_glyphs_are_distinct() {
    let mut glyphs = TILE_GLYPHS.to_vec();
    glyphs.sort_unstable();
    glyphs.dedup();
    assert_eq!(glyphs.len(), TILE_COUNT);
}
