use std::sync::Arc;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use crate::{
    direction::Direction,
    error::WfcError,
    grid::Grid,
    superposition::{Superposition, MAX_TILES},
    tileset::TileSet,
};

/// How far a collapse is propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Only the four neighbors of the just-collapsed cell are narrowed.
    /// This is the reference semantics and the default.
    #[default]
    OneStep,
    /// Worklist propagation: every narrowed cell re-examines its own
    /// neighbors until nothing changes. Changes contradiction rates and
    /// step counts, so it is opt-in rather than a silent replacement.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WfcConfig {
    pub width: usize,
    pub height: usize,
    /// Seed coordinate; drawn from the RNG when absent. Restarts always
    /// draw a fresh one.
    pub seed_point: Option<(usize, usize)>,
    /// Seed tile; drawn from the RNG when absent.
    pub seed_tile: Option<usize>,
    pub rng_seed: u64,
    pub propagation: Propagation,
    /// How many full-grid restarts `run` tolerates before giving up.
    pub restarts_left: usize,
}

impl Default for WfcConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed_point: None,
            seed_tile: None,
            rng_seed: 0,
            propagation: Propagation::default(),
            restarts_left: 100,
        }
    }
}

/// Outcome of one discrete step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The minimum-entropy cell was collapsed to `tile` and its
    /// constraints propagated.
    Collapsed { x: usize, y: usize, tile: usize },
    /// A contradiction was found; the grid was rebuilt and re-seeded.
    Restarted,
    /// Every cell holds exactly one tile. Further steps are no-ops.
    Complete,
}

enum Scan {
    Contradiction { x: usize, y: usize },
    Min { x: usize, y: usize },
    Complete,
}

/// Owns one collapse run: the grid, the adjacency rules and the RNG.
/// Everything is synchronous; an external driver paces the run by calling
/// [`WfcRunner::step`] and may read the grid between steps.
pub struct WfcRunner {
    tileset: Arc<dyn TileSet>,
    constraints: Arc<Vec<Vec<Superposition>>>,
    tile_count: usize,
    grid: Grid,
    rng: SmallRng,
    seed_point: (usize, usize),
    propagation: Propagation,
    restarts_left: usize,
    generation: u64,
}

impl WfcRunner {
    /// Validates the config, builds the fully superposed grid and collapses
    /// the seed cell. RNG draws happen in a fixed order (seed x, seed y,
    /// seed tile), so a fixed `rng_seed` makes the whole run reproducible.
    pub fn new(tileset: Arc<dyn TileSet>, config: WfcConfig) -> Result<Self, WfcError> {
        let WfcConfig { width, height, .. } = config;
        if width == 0 || height == 0 {
            return Err(WfcError::EmptyGrid { width, height });
        }
        let tile_count = tileset.tile_count();
        if tile_count == 0 {
            return Err(WfcError::EmptyTileSet);
        }
        if tile_count > MAX_TILES {
            return Err(WfcError::TooManyTiles(tile_count));
        }
        if let Some((x, y)) = config.seed_point {
            if x >= width || y >= height {
                return Err(WfcError::SeedOutOfBounds {
                    x,
                    y,
                    width,
                    height,
                });
            }
        }
        if let Some(tile) = config.seed_tile {
            if tile >= tile_count {
                return Err(WfcError::SeedTileOutOfRange { tile, tile_count });
            }
        }

        let mut rng = SmallRng::seed_from_u64(config.rng_seed);
        let seed_point = match config.seed_point {
            Some(point) => point,
            None => (rng.gen_range(0..width), rng.gen_range(0..height)),
        };
        let seed_tile = match config.seed_tile {
            Some(tile) => tile,
            None => rng.gen_range(0..tile_count),
        };

        let mut runner = Self {
            constraints: tileset.get_constraints(),
            tileset,
            tile_count,
            grid: Grid::filled(width, height, tile_count),
            rng,
            seed_point,
            propagation: config.propagation,
            restarts_left: config.restarts_left,
            generation: 0,
        };
        runner.seed(seed_point.0, seed_point.1, seed_tile);
        Ok(runner)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tileset(&self) -> &Arc<dyn TileSet> {
        &self.tileset
    }

    pub fn seed_point(&self) -> (usize, usize) {
        self.seed_point
    }

    /// Bumped every time a contradiction throws the grid away, so drivers
    /// can tell a restart happened between two reads.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// One discrete step: scan, then either restart on contradiction,
    /// report completion, or collapse the minimum-entropy cell and
    /// propagate from it.
    pub fn step(&mut self) -> StepResult {
        match self.scan() {
            Scan::Contradiction { x, y } => {
                warn!(x, y, generation = self.generation, "contradiction, restarting");
                self.restart();
                StepResult::Restarted
            }
            Scan::Complete => StepResult::Complete,
            Scan::Min { x, y } => {
                let mut cell = self.grid.get(x, y);
                let tile = cell
                    .select_random(&mut self.rng)
                    .expect("scanned cell has entropy > 1");
                self.grid.set(x, y, cell);
                debug!(x, y, tile, "collapsed cell");
                self.propagate_from(x, y);
                StepResult::Collapsed { x, y, tile }
            }
        }
    }

    /// Steps until the grid is fully collapsed, tolerating up to the
    /// configured number of restarts.
    pub fn run(&mut self) -> Result<(), WfcError> {
        let mut restarts = self.restarts_left;
        loop {
            match self.step() {
                StepResult::Collapsed { .. } => {}
                StepResult::Restarted => {
                    if restarts == 0 {
                        return Err(WfcError::RestartsExhausted(self.restarts_left));
                    }
                    restarts -= 1;
                }
                StepResult::Complete => {
                    info!(generation = self.generation, "collapse complete");
                    return Ok(());
                }
            }
        }
    }

    /// Row-major scan: short-circuits on the first empty cell, otherwise
    /// tracks the first uncollapsed cell with the fewest candidates. The
    /// seed cell is never reconsidered. First-found wins on ties, which
    /// keeps equally-seeded runs identical.
    fn scan(&self) -> Scan {
        let mut min_entropy = usize::MAX;
        let mut min_pos = None;
        for ((x, y), cell) in self.grid.iter() {
            if (x, y) == self.seed_point {
                continue;
            }
            let entropy = cell.count_bits();
            if entropy == 0 {
                return Scan::Contradiction { x, y };
            }
            if entropy > 1 && entropy < min_entropy {
                min_entropy = entropy;
                min_pos = Some((x, y));
            }
        }
        match min_pos {
            Some((x, y)) => Scan::Min { x, y },
            None => Scan::Complete,
        }
    }

    /// Force the cell to a single tile and propagate. The one collapse not
    /// chosen by the minimum-entropy rule; it breaks the initial symmetry
    /// of an all-superposed grid.
    fn seed(&mut self, x: usize, y: usize, tile: usize) {
        self.grid.set(x, y, Superposition::single(tile));
        debug!(x, y, tile, "seeded cell");
        self.propagate_from(x, y);
    }

    /// Throw the grid away and start over with a fresh random seed cell.
    fn restart(&mut self) {
        self.generation += 1;
        self.grid = Grid::filled(self.grid.width(), self.grid.height(), self.tile_count);
        let x = self.rng.gen_range(0..self.grid.width());
        let y = self.rng.gen_range(0..self.grid.height());
        let tile = self.rng.gen_range(0..self.tile_count);
        self.seed_point = (x, y);
        self.seed(x, y, tile);
    }

    fn propagate_from(&mut self, x: usize, y: usize) {
        match self.propagation {
            Propagation::OneStep => {
                for direction in Direction::ALL {
                    if let Some((nx, ny)) = self.grid.neighbor(x, y, direction) {
                        self.propagate_edge(x, y, direction, nx, ny);
                    }
                }
            }
            Propagation::Full => {
                let mut stack = vec![(x, y)];
                while let Some((sx, sy)) = stack.pop() {
                    for direction in Direction::ALL {
                        if let Some((nx, ny)) = self.grid.neighbor(sx, sy, direction) {
                            if self.propagate_edge(sx, sy, direction, nx, ny) {
                                stack.push((nx, ny));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Narrows the neighbor at `(nx, ny)` to the tiles allowed next to
    /// `(sx, sy)` in `direction`. Returns whether the neighbor shrank.
    /// Cells already down to one tile are never touched.
    fn propagate_edge(
        &mut self,
        sx: usize,
        sy: usize,
        direction: Direction,
        nx: usize,
        ny: usize,
    ) -> bool {
        let neighbor = self.grid.get(nx, ny);
        if neighbor.count_bits() <= 1 {
            return false;
        }

        let source = self.grid.get(sx, sy);
        let mut allowed = Superposition::empty();
        for tile in source.tile_iter() {
            allowed = Superposition::join(&allowed, &self.constraints[tile][direction as usize]);
        }

        let new_tiles = Superposition::intersect(&neighbor, &allowed);
        if new_tiles != neighbor {
            trace!(
                x = nx,
                y = ny,
                before = neighbor.count_bits(),
                after = new_tiles.count_bits(),
                "narrowed neighbor"
            );
            self.grid.set(nx, ny, new_tiles);
            return true;
        }
        false
    }
}
