use std::sync::Arc;

use wfc_core::{RuleSet, Superposition, TileSet};

pub const TILE_COUNT: usize = 8;

/// One display glyph per tile for text rendering.
pub const TILE_GLYPHS: [char; TILE_COUNT] = ['.', '#', '(', ')', '<', '>', '^', 'v'];

/// The eight desert tiles and which of them may sit next to which.
///
/// The table is not perfectly symmetric (tile 7 accepts 1 above itself, but
/// 1 does not accept 7 below); the engine treats that as authored data and
/// it just shows up as a higher restart rate.
#[derive(Debug, Clone)]
pub struct DesertTileset {
    rules: RuleSet,
}

impl Default for DesertTileset {
    fn default() -> Self {
        // allowed neighbors per tile, in up / down / left / right order
        let connections: [[&[usize]; 4]; TILE_COUNT] = [
            [&[0, 6], &[0, 5], &[2, 4, 7], &[2]],
            [&[3, 4, 5], &[3], &[1, 6], &[1, 7]],
            [&[2, 7], &[2, 4], &[0], &[0, 5, 6]],
            [&[1], &[1, 6, 7], &[3, 5], &[3, 4]],
            [&[2, 7], &[1, 6, 7], &[3, 5], &[0, 5, 6]],
            [&[0, 6], &[1, 6, 7], &[2, 4, 7], &[3, 4]],
            [&[3, 4, 5], &[0, 5], &[2, 4, 7], &[1, 7]],
            [&[1], &[2, 4], &[1, 6], &[0, 5, 6]],
        ];

        let rules = RuleSet::new(
            connections
                .iter()
                .map(|row| {
                    [
                        row[0].to_vec(),
                        row[1].to_vec(),
                        row[2].to_vec(),
                        row[3].to_vec(),
                    ]
                })
                .collect(),
        )
        .expect("desert adjacency table is static and in range");

        Self { rules }
    }
}

impl TileSet for DesertTileset {
    fn tile_count(&self) -> usize {
        TILE_COUNT
    }

    fn get_constraints(&self) -> Arc<Vec<Vec<Superposition>>> {
        self.rules.get_constraints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfc_core::Direction;

    #[test]
    fn table_matches_the_authored_rules() {
        let tileset = DesertTileset::default();
        assert_eq!(tileset.tile_count(), TILE_COUNT);

        let constraints = tileset.get_constraints();
        assert_eq!(constraints.len(), TILE_COUNT);

        let right_of_0 = &constraints[0][Direction::Right as usize];
        assert_eq!(right_of_0.count_bits(), 1);
        assert!(right_of_0.contains(2));

        let up_of_1 = &constraints[1][Direction::Up as usize];
        assert_eq!(up_of_1.count_bits(), 3);
        for tile in [3, 4, 5] {
            assert!(up_of_1.contains(tile));
        }

        let left_of_7 = &constraints[7][Direction::Left as usize];
        assert!(left_of_7.contains(1) && left_of_7.contains(6));
    }
}
