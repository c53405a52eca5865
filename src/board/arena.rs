//! The physical board: one arena of tiles referenced by id.
//!
//! Both tracks hold `TileId`s into this arena rather than tiles of their
//! own. The eight shared cells therefore exist exactly once, and every
//! occupancy change anywhere on the board goes through the arena.
//!
//! ## Layout
//!
//! | ids     | cells                                     |
//! |---------|-------------------------------------------|
//! | 0..8    | shared row, path positions 4..=11         |
//! | 8..14   | Player A private, positions 0-3, 12, 13   |
//! | 14..20  | Player B private, positions 0-3, 12, 13   |

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::tile::{OccupancyRecord, Occupant, OccupyOutcome, Territory, Tile, TileId};
use crate::core::{is_shared, PlayerId, BOARD_TILES, SHARED_POSITIONS, TRACK_LEN};

const PRIVATE_TILES: usize = TRACK_LEN - 8;
const PRIVATE_POSITIONS: [u8; PRIVATE_TILES] = [0, 1, 2, 3, 12, 13];

/// Owner of every board cell and the only place occupancy is mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileArena {
    tiles: Vec<Tile>,
}

impl Default for TileArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TileArena {
    /// Build the empty 20-cell board.
    #[must_use]
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(BOARD_TILES);

        for position in SHARED_POSITIONS {
            let id = TileId(tiles.len() as u8);
            tiles.push(Tile::new(id, position as u8, Territory::Shared));
        }

        for player in PlayerId::ALL {
            for position in PRIVATE_POSITIONS {
                let id = TileId(tiles.len() as u8);
                tiles.push(Tile::new(id, position, Territory::Private(player)));
            }
        }

        debug_assert_eq!(tiles.len(), BOARD_TILES);
        Self { tiles }
    }

    /// The tile id at each local position of `player`'s path.
    ///
    /// Positions 4..=11 resolve to the same ids for both players.
    #[must_use]
    pub fn path_for(player: PlayerId) -> [TileId; TRACK_LEN] {
        let private_base = SHARED_POSITIONS.clone().count() + player.index() * PRIVATE_TILES;

        std::array::from_fn(|position| {
            if is_shared(position) {
                TileId((position - SHARED_POSITIONS.start()) as u8)
            } else {
                let slot = PRIVATE_POSITIONS
                    .iter()
                    .position(|&p| p as usize == position)
                    .unwrap_or_default();
                TileId((private_base + slot) as u8)
            }
        })
    }

    /// Get a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Occupancy snapshot of a tile.
    #[must_use]
    pub fn query(&self, id: TileId) -> OccupancyRecord {
        self.get(id).query()
    }

    /// What would happen if `owner` entered `id`.
    #[must_use]
    pub fn classify(&self, id: TileId, owner: PlayerId) -> OccupyOutcome {
        self.get(id).classify(owner)
    }

    /// Try to enter a tile. See [`Tile::occupy`].
    pub fn occupy(&mut self, id: TileId, occupant: Occupant) -> OccupyOutcome {
        self.tiles[id.index()].occupy(occupant)
    }

    /// Clear a tile.
    pub fn vacate(&mut self, id: TileId) {
        self.tiles[id.index()].vacate();
    }

    /// Iterate over all tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of occupied tiles.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.query().is_occupied()).count()
    }
}

impl Index<TileId> for TileArena {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Self::Output {
        self.get(id)
    }
}
