pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod superposition;
pub mod tileset;

pub use direction::Direction;
pub use engine::{Propagation, StepResult, WfcConfig, WfcRunner};
pub use error::WfcError;
pub use grid::Grid;
pub use superposition::Superposition;
pub use tileset::{RuleSet, TileSet};
