pub mod desert_tileset;
pub mod json;

pub use desert_tileset::DesertTileset;
pub use json::TileSetModel;
