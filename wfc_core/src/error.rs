use thiserror::Error;

use crate::superposition::MAX_TILES;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WfcError {
    #[error("grid dimensions must be nonzero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("tile set has no tiles")]
    EmptyTileSet,

    #[error("tile count {0} exceeds the supported maximum of {MAX_TILES}")]
    TooManyTiles(usize),

    #[error("seed point ({x}, {y}) is outside the {width}x{height} grid")]
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("seed tile {tile} is outside the tile set of {tile_count} tiles")]
    SeedTileOutOfRange { tile: usize, tile_count: usize },

    #[error("tile {tile} allows neighbor {neighbor}, which is outside the tile set")]
    RuleOutOfRange { tile: usize, neighbor: usize },

    #[error("gave up after {0} grid restarts")]
    RestartsExhausted(usize),
}
