//! Observer interface for presentation.
//!
//! The turn controller calls these hooks synchronously, after the board has
//! changed. Every hook has an empty default so an observer only implements
//! what it animates.

use crate::board::Step;
use crate::core::{PlayerId, Rejection};

use super::event::GameEvent;

/// Receives notifications as a turn progresses.
///
/// Within an accepted move the order is: `on_pieces_pathed`, then
/// `on_piece_captured`, then `on_piece_scored` with `on_score_changed`
/// (and `on_game_won` on the winning move), then `on_rosette_landed`.
/// `on_turn_changed` comes when the turn is handed over.
pub trait GameObserver {
    fn on_dice_rolled(&mut self, _player: PlayerId, _roll: u8) {}

    fn on_pieces_pathed(&mut self, _player: PlayerId, _piece: u8, _path: &[Step]) {}

    /// `player` owns the captured piece.
    fn on_piece_captured(&mut self, _player: PlayerId, _piece: u8) {}

    fn on_piece_scored(&mut self, _player: PlayerId, _piece: u8) {}

    fn on_rosette_landed(&mut self, _player: PlayerId, _position: u8) {}

    fn on_score_changed(&mut self, _player: PlayerId, _score: u8) {}

    fn on_move_rejected(&mut self, _player: PlayerId, _piece: u8, _reason: Rejection) {}

    fn on_turn_forfeited(&mut self, _player: PlayerId, _roll: u8) {}

    /// `player` is now active.
    fn on_turn_changed(&mut self, _player: PlayerId) {}

    fn on_game_won(&mut self, _player: PlayerId) {}
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Records every notification as a [`GameEvent`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded since the last `take`.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

impl GameObserver for EventLog {
    fn on_dice_rolled(&mut self, player: PlayerId, roll: u8) {
        self.push(GameEvent::DiceRolled { player, roll });
    }

    fn on_pieces_pathed(&mut self, player: PlayerId, piece: u8, path: &[Step]) {
        self.push(GameEvent::PiecesPathed {
            player,
            piece,
            path: path.to_vec(),
        });
    }

    fn on_piece_captured(&mut self, player: PlayerId, piece: u8) {
        self.push(GameEvent::PieceCaptured { player, piece });
    }

    fn on_piece_scored(&mut self, player: PlayerId, piece: u8) {
        self.push(GameEvent::PieceScored { player, piece });
    }

    fn on_rosette_landed(&mut self, player: PlayerId, position: u8) {
        self.push(GameEvent::RosetteLanded { player, position });
    }

    fn on_score_changed(&mut self, player: PlayerId, score: u8) {
        self.push(GameEvent::ScoreChanged { player, score });
    }

    fn on_move_rejected(&mut self, player: PlayerId, piece: u8, reason: Rejection) {
        self.push(GameEvent::MoveRejected { player, piece, reason });
    }

    fn on_turn_forfeited(&mut self, player: PlayerId, roll: u8) {
        self.push(GameEvent::TurnForfeited { player, roll });
    }

    fn on_turn_changed(&mut self, player: PlayerId) {
        self.push(GameEvent::TurnChanged { player });
    }

    fn on_game_won(&mut self, player: PlayerId) {
        self.push(GameEvent::GameWon { player });
    }
}
