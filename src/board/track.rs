//! One player's path and the movement rules along it.
//!
//! A `Track` owns its player's seven pieces and the ordered list of tile ids
//! those pieces walk: four private cells, the eight shared cells, two more
//! private cells, then the virtual goal. Occupancy lives in the
//! [`TileArena`]; the track only records where each of its pieces is.
//!
//! ## Movement
//!
//! With `c` the current path index (-1 off the board) and `t = c + roll`:
//!
//! - `t == 14`: the piece bears off. Path is `c+1..=13` then the goal.
//! - `t > 14`: [`Rejection::Overshoot`]. Scoring needs the exact count.
//! - otherwise the piece lands on cell `t` if it is empty, or captures an
//!   opponent there unless the cell is a rosette.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::arena::TileArena;
use super::piece::{Piece, PieceLocation};
use super::tile::{Occupant, OccupyOutcome, TileId};
use crate::core::{PlayerId, Rejection, RulesError, MAX_ROLL, PIECES_PER_PLAYER, TRACK_LEN};

/// One step of a movement path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// A board cell.
    Cell(TileId),
    /// The owner's scoring sink beyond the last cell.
    Goal,
}

/// Cells a piece passes through, in order, ending on its destination.
///
/// Never longer than the roll, so four inline slots always suffice.
pub type Path = SmallVec<[Step; 4]>;

/// Where a legal move ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Land on a cell, possibly capturing the opponent piece standing there.
    Cell {
        tile: TileId,
        position: u8,
        capture: Option<u8>,
    },
    /// Bear the piece off.
    Goal,
}

/// A legal move worked out against the current board, not yet applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub piece: u8,
    pub from: PieceLocation,
    pub destination: Destination,
    pub path: Path,
}

/// Outcome of an accepted advance.
///
/// The board has already changed by the time this is returned; presentation
/// plays it back and cannot alter it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceResult {
    pub player: PlayerId,
    pub piece: u8,
    pub from: PieceLocation,
    pub to: PieceLocation,
    pub path: Path,
    /// Opponent piece index sent back to its pool.
    pub captured: Option<u8>,
    pub scored: bool,
    /// Always false for a scoring move.
    pub landed_on_rosette: bool,
}

/// Destination highlight for a hovered piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preview {
    /// The roll would end on this cell (whether or not entry is legal).
    Cell(TileId),
    /// The roll would bear the piece off.
    Scoring,
    /// The roll overshoots; there is nothing to highlight.
    OffTrack,
}

/// A player's path and pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    owner: PlayerId,
    cells: [TileId; TRACK_LEN],
    pieces: [Piece; PIECES_PER_PLAYER],
}

impl Track {
    /// Create a track with every piece off the board.
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            cells: TileArena::path_for(owner),
            pieces: std::array::from_fn(|i| Piece::new(owner, i as u8)),
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Tile ids along the path, indexed by local position.
    #[must_use]
    pub fn cells(&self) -> &[TileId; TRACK_LEN] {
        &self.cells
    }

    /// Tile id at a local position.
    #[must_use]
    pub fn cell(&self, position: u8) -> Option<TileId> {
        self.cells.get(position as usize).copied()
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece; PIECES_PER_PLAYER] {
        &self.pieces
    }

    /// Look up a piece, rejecting out-of-range indices.
    pub fn piece(&self, index: u8) -> Result<&Piece, RulesError> {
        self.pieces
            .get(index as usize)
            .ok_or(RulesError::InvalidPiece(index))
    }

    /// Number of this player's pieces borne off.
    #[must_use]
    pub fn scored_count(&self) -> u8 {
        self.pieces.iter().filter(|p| p.is_scored()).count() as u8
    }

    /// The tile a piece is standing on, if any.
    #[must_use]
    pub fn tile_of(&self, index: u8) -> Option<TileId> {
        match self.pieces.get(index as usize)?.location() {
            PieceLocation::OnTrack(position) => self.cell(position),
            _ => None,
        }
    }

    /// Validate a call and return the piece's current path index.
    fn start_index(&self, index: u8, roll: u8) -> Result<i8, RulesError> {
        if roll == 0 || roll > MAX_ROLL {
            return Err(RulesError::InvalidRoll(roll));
        }
        let piece = self.piece(index)?;
        piece.location().path_index().ok_or(RulesError::AlreadyScored {
            player: self.owner,
            piece: index,
        })
    }

    /// Cells from `first` to `last` inclusive as path steps.
    fn steps(&self, first: i8, last: i8) -> Path {
        (first..=last)
            .map(|i| Step::Cell(self.cells[i as usize]))
            .collect()
    }

    /// Work out the move `roll` would make for a piece without changing anything.
    ///
    /// Contract violations (bad index, bad roll, scored piece) are reported
    /// before legality is considered.
    pub fn check(&self, arena: &TileArena, index: u8, roll: u8) -> Result<MovePlan, RulesError> {
        let current = self.start_index(index, roll)?;
        let from = self.pieces[index as usize].location();
        let target = current + roll as i8;
        let goal = TRACK_LEN as i8;

        if target == goal {
            let mut path = self.steps(current + 1, goal - 1);
            path.push(Step::Goal);
            return Ok(MovePlan {
                piece: index,
                from,
                destination: Destination::Goal,
                path,
            });
        }

        if target > goal {
            return Err(Rejection::Overshoot { position: current, roll }.into());
        }

        let position = target as u8;
        let tile = self.cells[target as usize];
        let capture = match arena.classify(tile, self.owner) {
            OccupyOutcome::Success => None,
            OccupyOutcome::SelfBlocked => {
                return Err(Rejection::SelfOverlap { position }.into());
            }
            OccupyOutcome::Safe(_) => {
                return Err(Rejection::OpponentSafe { position }.into());
            }
            OccupyOutcome::Capturable(occupant) => Some(occupant.piece),
        };

        Ok(MovePlan {
            piece: index,
            from,
            destination: Destination::Cell { tile, position, capture },
            path: self.steps(current + 1, target),
        })
    }

    /// Move a piece by `roll`, updating the arena atomically.
    ///
    /// On a capture the opponent's tile is vacated here; the opponent's
    /// track still has to be told via [`Track::send_home`]. `BoardState`
    /// does both in one call.
    pub fn advance(
        &mut self,
        arena: &mut TileArena,
        index: u8,
        roll: u8,
    ) -> Result<AdvanceResult, RulesError> {
        let plan = self.check(arena, index, roll)?;

        if let Some(old) = self.tile_of(index) {
            arena.vacate(old);
        }

        let (to, captured, landed_on_rosette) = match plan.destination {
            Destination::Goal => (PieceLocation::Scored, None, false),
            Destination::Cell { tile, position, capture } => {
                if capture.is_some() {
                    arena.vacate(tile);
                }
                let outcome = arena.occupy(tile, Occupant::new(self.owner, index));
                debug_assert_eq!(outcome, OccupyOutcome::Success, "{tile} was cleared for entry");
                (PieceLocation::OnTrack(position), capture, arena[tile].is_rosette())
            }
        };

        self.pieces[index as usize].location = to;
        trace!(player = %self.owner, piece = index, ?to, "piece moved");

        Ok(AdvanceResult {
            player: self.owner,
            piece: index,
            from: plan.from,
            to,
            path: plan.path,
            captured,
            scored: to == PieceLocation::Scored,
            landed_on_rosette,
        })
    }

    /// Where a roll would take a piece, for highlighting.
    pub fn preview(&self, index: u8, roll: u8) -> Result<Preview, RulesError> {
        let current = self.start_index(index, roll)?;
        let target = current + roll as i8;

        Ok(match target {
            t if t < TRACK_LEN as i8 => Preview::Cell(self.cells[t as usize]),
            t if t == TRACK_LEN as i8 => Preview::Scoring,
            _ => Preview::OffTrack,
        })
    }

    /// Return a captured piece to the pool.
    ///
    /// The captor has already taken over the tile, so the arena is not touched.
    pub fn send_home(&mut self, index: u8) {
        if let Some(piece) = self.pieces.get_mut(index as usize) {
            debug!(%piece, "sent home");
            piece.location = PieceLocation::OffBoard;
        }
    }

    /// Place a piece directly, bypassing movement rules.
    ///
    /// Used to set up positions in tests and tools. The target cell must be empty.
    pub fn place(
        &mut self,
        arena: &mut TileArena,
        index: u8,
        location: PieceLocation,
    ) -> Result<(), RulesError> {
        self.piece(index)?;

        let entering = match location {
            PieceLocation::OnTrack(position) => {
                let tile = self.cell(position).ok_or(RulesError::InvalidPosition(position))?;
                if arena.query(tile).is_occupied() && self.tile_of(index) != Some(tile) {
                    return Err(RulesError::CellOccupied(tile));
                }
                Some(tile)
            }
            PieceLocation::OffBoard | PieceLocation::Scored => None,
        };

        if let Some(old) = self.tile_of(index) {
            arena.vacate(old);
        }
        if let Some(tile) = entering {
            arena.occupy(tile, Occupant::new(self.owner, index));
        }
        self.pieces[index as usize].location = location;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TileArena, Track, Track) {
        (TileArena::new(), Track::new(PlayerId::A), Track::new(PlayerId::B))
    }

    #[test]
    fn test_new_track() {
        let track = Track::new(PlayerId::B);
        assert_eq!(track.owner(), PlayerId::B);
        assert_eq!(track.pieces().len(), PIECES_PER_PLAYER);
        assert!(track.pieces().iter().all(|p| p.location() == PieceLocation::OffBoard));
        assert_eq!(track.scored_count(), 0);
    }

    #[test]
    fn test_enter_from_pool() {
        let (mut arena, mut a, _) = setup();

        let result = a.advance(&mut arena, 0, 1).unwrap();
        assert_eq!(result.to, PieceLocation::OnTrack(0));
        assert_eq!(result.path.as_slice(), &[Step::Cell(a.cells()[0])]);
        assert_eq!(arena.query(a.cells()[0]).occupant(), Some(Occupant::new(PlayerId::A, 0)));
    }

    #[test]
    fn test_move_vacates_old_cell() {
        let (mut arena, mut a, _) = setup();
        a.advance(&mut arena, 2, 2).unwrap();
        a.advance(&mut arena, 2, 3).unwrap();

        assert_eq!(a.pieces()[2].location(), PieceLocation::OnTrack(4));
        assert!(!arena.query(a.cells()[1]).is_occupied());
        assert_eq!(arena.occupied_count(), 1);
    }

    #[test]
    fn test_landing_on_rosette() {
        let (mut arena, mut a, _) = setup();
        let result = a.advance(&mut arena, 0, 4).unwrap();
        assert_eq!(result.to, PieceLocation::OnTrack(3));
        assert!(result.landed_on_rosette);
    }

    #[test]
    fn test_capture_vacates_for_captor() {
        let (mut arena, mut a, mut b) = setup();
        b.place(&mut arena, 5, PieceLocation::OnTrack(6)).unwrap();
        a.place(&mut arena, 1, PieceLocation::OnTrack(4)).unwrap();

        let result = a.advance(&mut arena, 1, 2).unwrap();
        assert_eq!(result.captured, Some(5));
        assert_eq!(arena.query(a.cells()[6]).occupant(), Some(Occupant::new(PlayerId::A, 1)));

        b.send_home(5);
        assert_eq!(b.pieces()[5].location(), PieceLocation::OffBoard);
    }

    #[test]
    fn test_scoring_from_last_cell() {
        let (mut arena, mut a, _) = setup();
        a.place(&mut arena, 3, PieceLocation::OnTrack(13)).unwrap();

        let result = a.advance(&mut arena, 3, 1).unwrap();
        assert!(result.scored);
        assert!(!result.landed_on_rosette);
        assert_eq!(result.path.as_slice(), &[Step::Goal]);
        assert_eq!(arena.occupied_count(), 0);
        assert_eq!(a.scored_count(), 1);
    }

    #[test]
    fn test_contract_violations() {
        let (mut arena, mut a, _) = setup();

        assert_eq!(a.check(&arena, 7, 2), Err(RulesError::InvalidPiece(7)));
        assert_eq!(a.check(&arena, 0, 0), Err(RulesError::InvalidRoll(0)));
        assert_eq!(a.check(&arena, 0, 5), Err(RulesError::InvalidRoll(5)));

        a.place(&mut arena, 0, PieceLocation::Scored).unwrap();
        assert_eq!(
            a.advance(&mut arena, 0, 1),
            Err(RulesError::AlreadyScored { player: PlayerId::A, piece: 0 })
        );
    }

    #[test]
    fn test_check_does_not_mutate() {
        let (mut arena, mut a, _) = setup();
        a.place(&mut arena, 0, PieceLocation::OnTrack(2)).unwrap();
        let before = (arena.clone(), a.clone());

        let plan = a.check(&arena, 0, 3).unwrap();
        assert_eq!(plan.destination, Destination::Cell { tile: a.cells()[5], position: 5, capture: None });
        assert_eq!((arena, a), before);
    }

    #[test]
    fn test_preview() {
        let (mut arena, mut a, _) = setup();
        a.place(&mut arena, 0, PieceLocation::OnTrack(11)).unwrap();

        assert_eq!(a.preview(0, 2), Ok(Preview::Cell(a.cells()[13])));
        assert_eq!(a.preview(0, 3), Ok(Preview::Scoring));
        assert_eq!(a.preview(0, 4), Ok(Preview::OffTrack));
        assert_eq!(a.preview(1, 1), Ok(Preview::Cell(a.cells()[0])));
    }

    #[test]
    fn test_place_refuses_occupied_cell() {
        let (mut arena, mut a, mut b) = setup();
        a.place(&mut arena, 0, PieceLocation::OnTrack(8)).unwrap();

        assert!(a.place(&mut arena, 1, PieceLocation::OnTrack(8)).is_err());
        assert!(b.place(&mut arena, 1, PieceLocation::OnTrack(8)).is_err());
        assert_eq!(a.place(&mut arena, 9, PieceLocation::OffBoard), Err(RulesError::InvalidPiece(9)));
    }
}
