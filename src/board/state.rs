//! Complete board state: the tile arena, both tracks and the score.
//!
//! `BoardState` is the unit of atomic mutation. A single [`BoardState::advance`]
//! moves the piece, resolves a capture on the opponent's track and records a
//! score before returning, so no observer can ever see a half-applied move.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::arena::TileArena;
use super::piece::PieceLocation;
use super::tile::{Occupant, TileId};
use super::track::{AdvanceResult, MovePlan, Preview, Track};
use crate::core::{
    InvariantViolation, PlayerId, PlayerMap, RulesError, PIECES_PER_PLAYER, WINNING_SCORE,
};
use crate::rules::TrackRules;

/// Points per player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    points: PlayerMap<u8>,
}

impl GameScore {
    #[must_use]
    pub fn get(&self, player: PlayerId) -> u8 {
        self.points[player]
    }

    /// The player who has borne off every piece, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        PlayerId::ALL
            .into_iter()
            .find(|&p| self.points[p] >= WINNING_SCORE)
    }

    /// Add a point and return the new total.
    fn record(&mut self, player: PlayerId) -> u8 {
        self.points[player] += 1;
        self.points[player]
    }
}

/// Serializable picture of the board for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub pieces: PlayerMap<[PieceLocation; PIECES_PER_PLAYER]>,
    pub score: GameScore,
}

/// Arena, tracks and score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    arena: TileArena,
    tracks: PlayerMap<Track>,
    score: GameScore,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board, every piece in its pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: TileArena::new(),
            tracks: PlayerMap::new(Track::new),
            score: GameScore::default(),
        }
    }

    #[must_use]
    pub fn arena(&self) -> &TileArena {
        &self.arena
    }

    #[must_use]
    pub fn track(&self, player: PlayerId) -> &Track {
        &self.tracks[player]
    }

    #[must_use]
    pub fn score(&self) -> &GameScore {
        &self.score
    }

    /// Location of one piece.
    pub fn location(&self, player: PlayerId, piece: u8) -> Result<PieceLocation, RulesError> {
        self.tracks[player].piece(piece).map(|p| p.location())
    }

    /// Legality check without mutation.
    pub fn check(&self, player: PlayerId, piece: u8, roll: u8) -> Result<MovePlan, RulesError> {
        self.tracks[player].check(&self.arena, piece, roll)
    }

    /// Destination highlight for a piece.
    pub fn preview(&self, player: PlayerId, piece: u8, roll: u8) -> Result<Preview, RulesError> {
        self.tracks[player].preview(piece, roll)
    }

    /// Pieces `player` could legally move with `roll`.
    #[must_use]
    pub fn selectable_pieces(&self, player: PlayerId, roll: u8) -> FxHashSet<u8> {
        self.tracks[player].selectable_pieces(&self.arena, roll)
    }

    /// Move a piece and apply every consequence.
    ///
    /// Rejections and contract violations leave the board untouched.
    pub fn advance(
        &mut self,
        player: PlayerId,
        piece: u8,
        roll: u8,
    ) -> Result<AdvanceResult, RulesError> {
        let (mover, opponent) = self.tracks.split_mut(player);
        let result = mover.advance(&mut self.arena, piece, roll)?;

        if let Some(captured) = result.captured {
            opponent.send_home(captured);
            info!(%player, piece, captured, "capture");
        }

        if result.scored {
            let total = self.score.record(player);
            info!(%player, piece, total, "piece scored");
        }

        Ok(result)
    }

    /// Put a piece somewhere directly, bypassing movement rules.
    ///
    /// For setting up positions; the score follows the number of scored pieces.
    pub fn place(
        &mut self,
        player: PlayerId,
        piece: u8,
        location: PieceLocation,
    ) -> Result<(), RulesError> {
        let track = &mut self.tracks[player];
        track.place(&mut self.arena, piece, location)?;
        self.score.points[player] = track.scored_count();
        Ok(())
    }

    /// Current piece locations and score.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            pieces: PlayerMap::new(|player| {
                let pieces = self.tracks[player].pieces();
                std::array::from_fn(|i| pieces[i].location())
            }),
            score: self.score.clone(),
        }
    }

    /// Cross-check tracks, arena and score.
    ///
    /// Rules calls keep these consistent; this exists for tests and the
    /// self-play driver.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        for (player, track) in self.tracks.iter() {
            let mut claimed: Vec<(TileId, u8)> = Vec::with_capacity(PIECES_PER_PLAYER);

            for piece in track.pieces() {
                let Some(tile) = track.tile_of(piece.index()) else {
                    continue;
                };

                if let Some(&(_, first)) = claimed.iter().find(|(t, _)| *t == tile) {
                    return Err(InvariantViolation::SharedCell {
                        player,
                        first,
                        second: piece.index(),
                        tile,
                    });
                }
                claimed.push((tile, piece.index()));

                if !self.arena[tile].territory().admits(player) {
                    return Err(InvariantViolation::ForeignTerritory {
                        tile,
                        player,
                        piece: piece.index(),
                    });
                }

                let record = self.arena.query(tile);
                if record.occupant() != Some(Occupant::new(player, piece.index())) {
                    return Err(InvariantViolation::LocationMismatch {
                        player,
                        piece: piece.index(),
                        tile,
                        recorded: record.to_string(),
                    });
                }
            }

            let scored = track.scored_count();
            if scored != self.score.get(player) {
                return Err(InvariantViolation::ScoreMismatch {
                    player,
                    scored,
                    score: self.score.get(player),
                });
            }
        }

        for tile in self.arena.tiles() {
            let Some(occupant) = tile.query().occupant() else {
                continue;
            };
            let standing = self.tracks[occupant.owner].tile_of(occupant.piece);
            if standing != Some(tile.id()) {
                return Err(InvariantViolation::StaleOccupant {
                    tile: tile.id(),
                    player: occupant.owner,
                    piece: occupant.piece,
                });
            }
        }

        Ok(())
    }
}
