//! Pieces and where they are.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where a piece is relative to its owner's path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceLocation {
    /// In the starting pool, not yet entered (or captured and sent back).
    #[default]
    OffBoard,
    /// On the owner's path at local position 0..=13.
    OnTrack(u8),
    /// Borne off. Scored pieces never move again.
    Scored,
}

impl PieceLocation {
    /// Path index used by the movement arithmetic: -1 before entering.
    ///
    /// Scored pieces have no index.
    #[must_use]
    pub fn path_index(self) -> Option<i8> {
        match self {
            PieceLocation::OffBoard => Some(-1),
            PieceLocation::OnTrack(position) => Some(position as i8),
            PieceLocation::Scored => None,
        }
    }
}

/// One of a player's seven pieces.
///
/// Pieces are created once per game and recycled between locations. Only
/// the owning track changes `location`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    owner: PlayerId,
    index: u8,
    pub(crate) location: PieceLocation,
}

impl Piece {
    #[must_use]
    pub const fn new(owner: PlayerId, index: u8) -> Self {
        Self {
            owner,
            index,
            location: PieceLocation::OffBoard,
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn index(&self) -> u8 {
        self.index
    }

    #[must_use]
    pub fn location(&self) -> PieceLocation {
        self.location
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.location == PieceLocation::Scored
    }

    #[must_use]
    pub fn is_on_track(&self) -> bool {
        matches!(self.location, PieceLocation::OnTrack(_))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} piece {}", self.owner, self.index)
    }
}
