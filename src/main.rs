use std::sync::Arc;

use anyhow::{Context, Result};
use dunefield::desert_tileset::{DesertTileset, TILE_GLYPHS};
use tracing_subscriber::EnvFilter;
use wfc_core::{Propagation, WfcConfig, WfcRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let width = parse_dimension(args.next(), 32)?;
    let height = parse_dimension(args.next(), 16)?;
    let rng_seed = match args.next() {
        Some(seed) => seed.parse().context("seed must be an integer")?,
        None => rand::random(),
    };

    let config = WfcConfig {
        width,
        height,
        rng_seed,
        propagation: Propagation::Full,
        restarts_left: 1000,
        ..Default::default()
    };
    let mut runner = WfcRunner::new(Arc::new(DesertTileset::default()), config)?;
    runner.run()?;

    let mut out = String::with_capacity((width + 1) * height);
    for ((x, _), cell) in runner.grid().iter() {
        match cell.collapsed() {
            Some(tile) => out.push(TILE_GLYPHS[tile]),
            None => out.push('?'),
        }
        if x == width - 1 {
            out.push('\n');
        }
    }
    print!("{out}");
    eprintln!("seed {rng_seed}, {} restarts", runner.generation());

    Ok(())
}

fn parse_dimension(arg: Option<String>, default: usize) -> Result<usize> {
    match arg {
        Some(value) => value.parse().context("grid dimensions must be integers"),
        None => Ok(default),
    }
}
