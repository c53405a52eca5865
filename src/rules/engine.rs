//! The movement contract shared by both tracks.
//!
//! The turn controller and `BoardState` drive "the active track" and
//! "the opponent track" through this trait. Nothing above it branches on
//! which player owns a track.

use rustc_hash::FxHashSet;

use crate::board::{AdvanceResult, MovePlan, Preview, TileArena, Track};
use crate::core::{PlayerId, RulesError, PIECES_PER_PLAYER};

/// Movement rules for one player's path.
///
/// ## Implementation Notes
///
/// - `check` must not mutate anything
/// - `advance` either applies the whole move or returns an error with
///   nothing changed
/// - `send_home` only updates the track; the captor already holds the tile
pub trait TrackRules {
    /// Player whose pieces walk this track.
    fn owner(&self) -> PlayerId;

    /// Work out the move a roll would make.
    fn check(&self, arena: &TileArena, piece: u8, roll: u8) -> Result<MovePlan, RulesError>;

    /// Apply a move.
    fn advance(
        &mut self,
        arena: &mut TileArena,
        piece: u8,
        roll: u8,
    ) -> Result<AdvanceResult, RulesError>;

    /// Destination highlight for a piece.
    fn preview(&self, piece: u8, roll: u8) -> Result<Preview, RulesError>;

    /// Return a captured piece to the pool.
    fn send_home(&mut self, piece: u8);

    // === Convenience Methods ===

    /// The player on the other track.
    fn opponent(&self) -> PlayerId {
        self.owner().opponent()
    }

    /// Pieces that have a legal move with `roll`.
    ///
    /// Empty for a zero roll, and when every piece is blocked or scored.
    fn selectable_pieces(&self, arena: &TileArena, roll: u8) -> FxHashSet<u8> {
        (0..PIECES_PER_PLAYER as u8)
            .filter(|&piece| self.check(arena, piece, roll).is_ok())
            .collect()
    }

    /// Whether any piece can move with `roll`.
    fn can_move(&self, arena: &TileArena, roll: u8) -> bool {
        (0..PIECES_PER_PLAYER as u8).any(|piece| self.check(arena, piece, roll).is_ok())
    }
}

impl TrackRules for Track {
    fn owner(&self) -> PlayerId {
        Track::owner(self)
    }

    fn check(&self, arena: &TileArena, piece: u8, roll: u8) -> Result<MovePlan, RulesError> {
        Track::check(self, arena, piece, roll)
    }

    fn advance(
        &mut self,
        arena: &mut TileArena,
        piece: u8,
        roll: u8,
    ) -> Result<AdvanceResult, RulesError> {
        Track::advance(self, arena, piece, roll)
    }

    fn preview(&self, piece: u8, roll: u8) -> Result<Preview, RulesError> {
        Track::preview(self, piece, roll)
    }

    fn send_home(&mut self, piece: u8) {
        Track::send_home(self, piece);
    }
}
