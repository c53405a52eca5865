//! Game events.
//!
//! Everything the presentation layer needs to animate a turn, in the order
//! the turn controller reports it. Events are records of changes that have
//! already been applied to the board; consuming them cannot alter the game.

use serde::{Deserialize, Serialize};

use crate::board::Step;
use crate::core::{PlayerId, Rejection};

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The active player threw the dice.
    DiceRolled { player: PlayerId, roll: u8 },

    /// A piece moved along these steps, ending on its destination.
    PiecesPathed {
        player: PlayerId,
        piece: u8,
        path: Vec<Step>,
    },

    /// An opponent piece was knocked back to its pool.
    PieceCaptured { player: PlayerId, piece: u8 },

    /// A piece was borne off.
    PieceScored { player: PlayerId, piece: u8 },

    /// The moved piece ended on a rosette; the same player rolls again.
    RosetteLanded { player: PlayerId, position: u8 },

    /// A player's score changed.
    ScoreChanged { player: PlayerId, score: u8 },

    /// The chosen piece cannot move; the player must choose again.
    MoveRejected {
        player: PlayerId,
        piece: u8,
        reason: Rejection,
    },

    /// The roll could not be used and the turn passes.
    TurnForfeited { player: PlayerId, roll: u8 },

    /// A new turn began for this player.
    TurnChanged { player: PlayerId },

    /// This player has borne off every piece.
    GameWon { player: PlayerId },
}

impl GameEvent {
    /// The player this event concerns.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            GameEvent::DiceRolled { player, .. }
            | GameEvent::PiecesPathed { player, .. }
            | GameEvent::PieceCaptured { player, .. }
            | GameEvent::PieceScored { player, .. }
            | GameEvent::RosetteLanded { player, .. }
            | GameEvent::ScoreChanged { player, .. }
            | GameEvent::MoveRejected { player, .. }
            | GameEvent::TurnForfeited { player, .. }
            | GameEvent::TurnChanged { player }
            | GameEvent::GameWon { player } => *player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileId;

    #[test]
    fn test_event_player() {
        let event = GameEvent::PieceCaptured { player: PlayerId::B, piece: 3 };
        assert_eq!(event.player(), PlayerId::B);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = GameEvent::TurnChanged { player: PlayerId::A };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "turn_changed");
        assert_eq!(json["player"], "A");
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::PiecesPathed {
            player: PlayerId::A,
            piece: 2,
            path: vec![Step::Cell(TileId(12)), Step::Cell(TileId(13)), Step::Goal],
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
