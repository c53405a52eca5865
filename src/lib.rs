//! # royal-ur
//!
//! Rules engine for the Royal Game of Ur, a two-player race game.
//!
//! ## Design Principles
//!
//! 1. **One board, two paths**: the eight shared cells exist once, in a
//!    tile arena. Each player's track is a list of ids into it, so a change
//!    made through one path is immediately visible from the other.
//!
//! 2. **Atomic moves**: a move, its capture and its score are applied in one
//!    call. Rejections and contract violations are detected before anything
//!    changes.
//!
//! 3. **Presentation is a consumer**: the turn controller reports applied
//!    changes to a `GameObserver` and waits for playback to finish. Nothing
//!    a renderer does can alter the board.
//!
//! ## Modules
//!
//! - `core`: players, RNG, constants, configuration, errors
//! - `board`: tiles, the arena, tracks, pieces and the combined board state
//! - `rules`: the `TrackRules` trait, dice and the turn state machine
//! - `events`: observer hooks and serializable game events

pub mod core;
pub mod board;
pub mod rules;
pub mod events;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameRng, GameRngState, InvariantViolation, PlayerId, PlayerMap, Rejection,
    RulesError,
};

pub use crate::board::{
    AdvanceResult, BoardSnapshot, BoardState, Destination, GameScore, MovePlan, Occupant,
    OccupancyRecord, OccupyOutcome, Piece, PieceLocation, Preview, Step, Territory, Tile,
    TileArena, TileId, Track,
};

pub use crate::rules::{
    DiceRoll, DiceSource, ScriptedDice, TetrahedralDice, TrackRules, TurnController, TurnPhase,
    TurnState,
};

pub use crate::events::{EventLog, GameEvent, GameObserver, NullObserver};
