//! Board topology and piece movement.
//!
//! - [`TileArena`]: the twenty physical cells, owned once
//! - [`Track`]: one player's path of tile ids plus their seven pieces
//! - [`BoardState`]: arena, both tracks and the score, mutated as a unit

pub mod tile;
pub mod arena;
pub mod piece;
pub mod track;
pub mod state;

pub use tile::{OccupancyRecord, Occupant, OccupyOutcome, Territory, Tile, TileId};
pub use arena::TileArena;
pub use piece::{Piece, PieceLocation};
pub use track::{AdvanceResult, Destination, MovePlan, Path, Preview, Step, Track};
pub use state::{BoardSnapshot, BoardState, GameScore};
