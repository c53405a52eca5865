//! Core types: players, RNG, configuration, errors.
//!
//! These are the building blocks every other module depends on. Nothing in
//! here knows about tiles or turns.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{
    is_rosette, is_shared, GameConfig, BOARD_TILES, MAX_ROLL, PIECES_PER_PLAYER, ROSETTES,
    SHARED_POSITIONS, TRACK_LEN, WINNING_SCORE,
};
pub use error::{InvariantViolation, Rejection, RulesError};
