//! A single board cell and its occupancy.
//!
//! A `Tile` only ever changes through [`Tile::occupy`] and [`Tile::vacate`].
//! It knows nothing about other tiles: capturing means the caller vacates
//! the cell and then occupies it again for the mover.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{is_rosette, PlayerId};

/// Index of a physical cell in the [`TileArena`](super::TileArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u8);

impl TileId {
    /// Get the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile {}", self.0)
    }
}

/// Who may stand on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Territory {
    /// On one player's private stretch (path positions 0-3 and 12-13).
    Private(PlayerId),
    /// The middle row both paths run through.
    Shared,
}

impl Territory {
    /// Whether `player`'s pieces can ever stand here.
    #[must_use]
    pub fn admits(self, player: PlayerId) -> bool {
        match self {
            Territory::Private(owner) => owner == player,
            Territory::Shared => true,
        }
    }
}

/// The piece standing on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub owner: PlayerId,
    pub piece: u8,
}

impl Occupant {
    #[must_use]
    pub const fn new(owner: PlayerId, piece: u8) -> Self {
        Self { owner, piece }
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} piece {}", self.owner, self.piece)
    }
}

/// Read-only snapshot of a tile's occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupancyRecord {
    occupant: Option<Occupant>,
}

impl OccupancyRecord {
    /// An empty record.
    #[must_use]
    pub const fn empty() -> Self {
        Self { occupant: None }
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    #[must_use]
    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.occupant.map(|o| o.owner)
    }

    #[must_use]
    pub fn piece_index(&self) -> Option<u8> {
        self.occupant.map(|o| o.piece)
    }
}

impl std::fmt::Display for OccupancyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.occupant {
            Some(occupant) => write!(f, "{occupant}"),
            None => write!(f, "nothing"),
        }
    }
}

/// Result of trying to enter a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupyOutcome {
    /// The tile was empty and is now held by the entering piece.
    Success,
    /// The tile holds a piece of the same owner.
    SelfBlocked,
    /// The tile holds an opponent piece that may be captured.
    Capturable(Occupant),
    /// The tile is a rosette holding an opponent piece, which is safe there.
    Safe(Occupant),
}

/// A physical board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    position: u8,
    territory: Territory,
    rosette: bool,
    occupancy: OccupancyRecord,
}

impl Tile {
    /// Create an empty tile at a local path position.
    ///
    /// Shared cells sit at the same position on both players' paths, so the
    /// position alone decides the rosette flag.
    #[must_use]
    pub fn new(id: TileId, position: u8, territory: Territory) -> Self {
        Self {
            id,
            position,
            territory,
            rosette: is_rosette(position as usize),
            occupancy: OccupancyRecord::empty(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Local path position (0-13) of this cell.
    #[must_use]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[must_use]
    pub fn territory(&self) -> Territory {
        self.territory
    }

    #[must_use]
    pub fn is_rosette(&self) -> bool {
        self.rosette
    }

    /// Snapshot of the current occupancy. Side-effect free.
    #[must_use]
    pub fn query(&self) -> OccupancyRecord {
        self.occupancy
    }

    /// Classify what would happen if `owner` tried to enter, without entering.
    #[must_use]
    pub fn classify(&self, owner: PlayerId) -> OccupyOutcome {
        match self.occupancy.occupant {
            None => OccupyOutcome::Success,
            Some(current) if current.owner == owner => OccupyOutcome::SelfBlocked,
            Some(current) if self.rosette => OccupyOutcome::Safe(current),
            Some(current) => OccupyOutcome::Capturable(current),
        }
    }

    /// Try to place `occupant` here.
    ///
    /// Only an empty tile is entered. Every other outcome leaves the tile
    /// untouched and tells the caller what is in the way.
    pub fn occupy(&mut self, occupant: Occupant) -> OccupyOutcome {
        let outcome = self.classify(occupant.owner);
        if outcome == OccupyOutcome::Success {
            trace!(tile = %self.id, %occupant, "occupy");
            self.occupancy.occupant = Some(occupant);
        }
        outcome
    }

    /// Clear the tile unconditionally.
    pub fn vacate(&mut self) {
        if let Some(occupant) = self.occupancy.occupant.take() {
            trace!(tile = %self.id, %occupant, "vacate");
        }
    }
}
