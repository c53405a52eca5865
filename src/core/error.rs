//! Error taxonomy.
//!
//! - [`Rejection`]: an expected, player-recoverable outcome. The roll is not
//!   consumed and the player picks another piece.
//! - [`RulesError`]: everything a rules call can return. Apart from
//!   `Rejected`, its variants are contract violations by the caller.
//!   They are detected before any state is touched.
//! - [`InvariantViolation`]: internal inconsistency found by
//!   `BoardState::verify`. Never returned by a rules call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;
use crate::board::TileId;
use crate::rules::TurnPhase;

/// Why a selected piece cannot make the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// Bearing off needs the exact count.
    #[error("a roll of {roll} from position {position} overshoots the goal; scoring needs an exact count")]
    Overshoot { position: i8, roll: u8 },

    /// The destination already holds one of the mover's own pieces.
    #[error("position {position} is already occupied by your own piece")]
    SelfOverlap { position: u8 },

    /// The destination is a rosette holding an opponent piece.
    #[error("the opponent piece on rosette {position} is safe")]
    OpponentSafe { position: u8 },
}

/// Errors returned by rules operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The move is illegal but the player may choose again.
    #[error("move rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Piece index outside `0..7`.
    #[error("piece index {0} is out of range")]
    InvalidPiece(u8),

    /// The piece has already been borne off.
    #[error("{player} piece {piece} has already scored")]
    AlreadyScored { player: PlayerId, piece: u8 },

    /// Rolls handed to `advance` must be in `1..=4`.
    #[error("roll {0} cannot move a piece")]
    InvalidRoll(u8),

    /// Path positions run `0..14`.
    #[error("position {0} is not on the path")]
    InvalidPosition(u8),

    /// Direct placement onto a cell that already holds a piece.
    #[error("{0} is already occupied")]
    CellOccupied(TileId),

    /// The turn controller is not in a phase that accepts this action.
    #[error("cannot {action} while {phase}")]
    WrongPhase { action: &'static str, phase: TurnPhase },

    /// A player has already reached the winning score.
    #[error("the game is over; {0} has won")]
    GameOver(PlayerId),
}

impl RulesError {
    /// Whether this is a gameplay rejection rather than a contract violation.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, RulesError::Rejected(_))
    }

    /// The rejection reason, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            RulesError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Internal consistency failure detected by `BoardState::verify`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{player} pieces {first} and {second} both claim {tile}")]
    SharedCell {
        player: PlayerId,
        first: u8,
        second: u8,
        tile: TileId,
    },

    #[error("{player} piece {piece} claims {tile} but the tile records {recorded}")]
    LocationMismatch {
        player: PlayerId,
        piece: u8,
        tile: TileId,
        recorded: String,
    },

    #[error("{tile} records {player} piece {piece} which is not standing there")]
    StaleOccupant { tile: TileId, player: PlayerId, piece: u8 },

    #[error("{tile} is not on {player}'s path but holds their piece {piece}")]
    ForeignTerritory { tile: TileId, player: PlayerId, piece: u8 },

    #[error("{player} has {scored} scored pieces but a score of {score}")]
    ScoreMismatch { player: PlayerId, scored: u8, score: u8 },
}
