use std::sync::Arc;

use crate::{
    direction::Direction,
    error::WfcError,
    superposition::{Superposition, MAX_TILES},
};

/// Directional adjacency rules for a fixed table of tiles.
///
/// `get_constraints()[tile][direction as usize]` is the set of tiles allowed
/// adjacent to `tile` in that direction. The table is immutable once built;
/// symmetry (if A allows B to its right, B allows A to its left) is an
/// authoring convention and is not checked here.
pub trait TileSet: Send + Sync {
    fn tile_count(&self) -> usize;
    fn get_constraints(&self) -> Arc<Vec<Vec<Superposition>>>;

    fn compatible_neighbors(&self, tile: usize, direction: Direction) -> Superposition {
        self.get_constraints()[tile][direction as usize]
    }
}

/// Concrete adjacency table built from per-direction neighbor lists.
#[derive(Debug, Clone)]
pub struct RuleSet {
    constraints: Arc<Vec<Vec<Superposition>>>,
    tile_count: usize,
}

impl RuleSet {
    /// Builds a rule set from one `[up, down, left, right]` row of allowed
    /// neighbor indices per tile. Rejects empty tables, tables beyond the
    /// superposition width and rows referencing out-of-range tiles.
    pub fn new(rules: Vec<[Vec<usize>; Direction::COUNT]>) -> Result<Self, WfcError> {
        let tile_count = rules.len();
        if tile_count == 0 {
            return Err(WfcError::EmptyTileSet);
        }
        if tile_count > MAX_TILES {
            return Err(WfcError::TooManyTiles(tile_count));
        }

        let mut constraints = Vec::with_capacity(tile_count);
        for (tile, row) in rules.iter().enumerate() {
            let mut allowed = Vec::with_capacity(Direction::COUNT);
            for neighbors in row {
                for &neighbor in neighbors {
                    if neighbor >= tile_count {
                        return Err(WfcError::RuleOutOfRange { tile, neighbor });
                    }
                }
                allowed.push(Superposition::from_iter(neighbors.iter().copied()));
            }
            constraints.push(allowed);
        }

        Ok(Self {
            constraints: Arc::new(constraints),
            tile_count,
        })
    }

    /// Rule set where every tile allows every tile in every direction.
    pub fn permissive(tile_count: usize) -> Result<Self, WfcError> {
        let all: Vec<usize> = (0..tile_count).collect();
        let rules = (0..tile_count)
            .map(|_| [all.clone(), all.clone(), all.clone(), all.clone()])
            .collect();
        Self::new(rules)
    }
}

impl TileSet for RuleSet {
    fn tile_count(&self) -> usize {
        self.tile_count
    }

    fn get_constraints(&self) -> Arc<Vec<Vec<Superposition>>> {
        self.constraints.clone()
    }
}
