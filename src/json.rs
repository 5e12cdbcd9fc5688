use std::{fs, io::BufReader, path::Path};

use serde::Deserialize;
use wfc_core::{RuleSet, WfcError};

/// On-disk description of one tile's adjacency rules.
#[derive(Deserialize, Debug)]
pub struct TileModel {
    pub name: String,
    #[serde(default)]
    pub up: Vec<usize>,
    #[serde(default)]
    pub down: Vec<usize>,
    #[serde(default)]
    pub left: Vec<usize>,
    #[serde(default)]
    pub right: Vec<usize>,
}

/// On-disk description of a whole adjacency table.
#[derive(Deserialize, Debug)]
pub struct TileSetModel {
    pub tiles: Vec<TileModel>,
}

impl TileSetModel {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Index-range validation happens here, when the model becomes a table.
    pub fn into_rules(self) -> Result<RuleSet, WfcError> {
        RuleSet::new(
            self.tiles
                .into_iter()
                .map(|tile| [tile.up, tile.down, tile.left, tile.right])
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfc_core::{Direction, TileSet};

    const TWO_TILES: &str = r#"{
        "tiles": [
            { "name": "sand", "up": [0, 1], "down": [0, 1], "left": [0], "right": [0] },
            { "name": "rock", "up": [1], "down": [1], "left": [1], "right": [1] }
        ]
    }"#;

    #[test]
    fn parses_and_builds_rules() {
        let model = TileSetModel::from_json(TWO_TILES).unwrap();
        assert_eq!(model.tiles.len(), 2);
        assert_eq!(model.tiles[0].name, "sand");

        let rules = model.into_rules().unwrap();
        assert_eq!(rules.tile_count(), 2);
        let up = rules.compatible_neighbors(0, Direction::Up);
        assert!(up.contains(0) && up.contains(1));
        assert_eq!(
            rules.compatible_neighbors(1, Direction::Left).count_bits(),
            1
        );
    }

    #[test]
    fn missing_directions_default_to_empty() {
        let model =
            TileSetModel::from_json(r#"{ "tiles": [{ "name": "lone" }] }"#).unwrap();
        let rules = model.into_rules().unwrap();
        for dir in Direction::ALL {
            assert_eq!(rules.compatible_neighbors(0, dir).count_bits(), 0);
        }
    }

    #[test]
    fn out_of_range_neighbor_is_rejected() {
        let model = TileSetModel::from_json(
            r#"{ "tiles": [{ "name": "bad", "up": [3] }] }"#,
        )
        .unwrap();
        assert_eq!(
            model.into_rules().err().unwrap(),
            WfcError::RuleOutOfRange { tile: 0, neighbor: 3 }
        );
    }
}
