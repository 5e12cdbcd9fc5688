use rand::Rng;

pub const TILE_U32S: usize = 4;

/// Largest tile count a superposition can represent.
pub const MAX_TILES: usize = TILE_U32S * 32;

/// Set of tile indices a cell can still become, stored as a fixed-width
/// bitset. A cell's entropy is `count_bits()`, so it is always derived from
/// the set itself and can never drift out of sync with it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Superposition {
    bits: [u32; TILE_U32S],
}

impl Superposition {
    /// Superposition with the first `size` tiles set.
    pub fn filled(size: usize) -> Self {
        let mut result = [0; TILE_U32S];
        for i in 0..size {
            result[i / 32] |= 1 << (i % 32);
        }
        Self { bits: result }
    }

    pub fn empty() -> Self {
        Self {
            bits: [0; TILE_U32S],
        }
    }

    pub fn single(tile: usize) -> Self {
        let mut cell = Self::empty();
        cell.add_tile(tile);
        cell
    }

    pub fn from_iter(tiles: impl IntoIterator<Item = usize>) -> Self {
        let mut cell = Self::empty();
        for tile in tiles {
            cell.add_tile(tile);
        }
        cell
    }

    pub fn add_tile(&mut self, tile: usize) {
        self.bits[tile / 32] |= 1 << (tile % 32);
    }

    pub fn remove_tile(&mut self, tile: usize) {
        self.bits[tile / 32] &= !(1 << (tile % 32));
    }

    pub fn contains(&self, tile: usize) -> bool {
        0 != (self.bits[tile / 32] & 1 << (tile % 32))
    }

    /// Returns the one and only tile if there is only one.
    pub fn collapsed(&self) -> Option<usize> {
        if self.count_bits() == 1 {
            self.tile_iter().next()
        } else {
            None
        }
    }

    /// Uniformly picks one of the remaining tiles, leaves only that bit set
    /// and returns it. `None` when the set is already empty.
    pub fn select_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        let count = self.count_bits();
        if count == 0 {
            return None;
        }
        let tile = self.tile_iter().nth(rng.gen_range(0..count))?;
        self.bits = [0; TILE_U32S];
        self.add_tile(tile);
        Some(tile)
    }

    pub fn join(a: &Self, b: &Self) -> Self {
        let mut result = [0; TILE_U32S];
        for i in 0..TILE_U32S {
            result[i] = a.bits[i] | b.bits[i];
        }
        Self { bits: result }
    }

    pub fn intersect(a: &Self, b: &Self) -> Self {
        let mut result = [0; TILE_U32S];
        for i in 0..TILE_U32S {
            result[i] = a.bits[i] & b.bits[i];
        }
        Self { bits: result }
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        Self::intersect(self, other) == *self
    }

    /// Counts the number of bits set to 1.
    pub fn count_bits(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Returns an iterator over all the set bits.
    pub fn tile_iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..TILE_U32S).flat_map(move |i| {
            (0..32).filter_map(move |j| {
                if self.bits[i] & (1 << j) != 0 {
                    Some(i * 32 + j)
                } else {
                    None
                }
            })
        })
    }
}

impl std::fmt::Debug for Superposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.tile_iter()).finish()
    }
}
