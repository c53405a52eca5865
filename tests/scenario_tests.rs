//! Movement rules on concrete positions.

use royal_ur::core::Rejection;
use royal_ur::{BoardState, PieceLocation, PlayerId, RulesError, Step};

fn board_with(pieces: &[(PlayerId, u8, u8)]) -> BoardState {
    let mut board = BoardState::new();
    for &(player, piece, position) in pieces {
        board.place(player, piece, PieceLocation::OnTrack(position)).unwrap();
    }
    board
}

// =============================================================================
// Entering and plain moves
// =============================================================================

#[test]
fn test_enter_from_pool() {
    let mut board = BoardState::new();

    let result = board.advance(PlayerId::A, 0, 3).unwrap();

    assert_eq!(result.from, PieceLocation::OffBoard);
    assert_eq!(result.to, PieceLocation::OnTrack(2));
    assert_eq!(result.path.len(), 3);
    assert_eq!(result.captured, None);
    assert!(!result.scored);
    assert!(!result.landed_on_rosette);

    let cells = board.track(PlayerId::A).cells();
    let expected: Vec<Step> = cells[0..3].iter().map(|&t| Step::Cell(t)).collect();
    assert_eq!(result.path.to_vec(), expected);
    assert_eq!(board.verify(), Ok(()));
}

#[test]
fn test_enter_blocked_by_own_piece() {
    let mut board = board_with(&[(PlayerId::B, 0, 0)]);

    let err = board.advance(PlayerId::B, 1, 1).unwrap_err();
    assert_eq!(err, RulesError::Rejected(Rejection::SelfOverlap { position: 0 }));
}

#[test]
fn test_private_starts_do_not_interact() {
    let mut board = board_with(&[(PlayerId::A, 0, 2)]);

    // B's position 2 is a different cell from A's
    let result = board.advance(PlayerId::B, 0, 3).unwrap();
    assert_eq!(result.captured, None);
    assert_eq!(board.location(PlayerId::A, 0), Ok(PieceLocation::OnTrack(2)));
    assert_eq!(board.arena().occupied_count(), 2);
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_on_shared_cell() {
    let mut board = board_with(&[(PlayerId::A, 1, 8), (PlayerId::B, 4, 10)]);

    let result = board.advance(PlayerId::A, 1, 2).unwrap();

    assert_eq!(result.to, PieceLocation::OnTrack(10));
    assert_eq!(result.captured, Some(4));
    assert_eq!(board.location(PlayerId::B, 4), Ok(PieceLocation::OffBoard));

    let tile = board.track(PlayerId::B).cells()[10];
    assert_eq!(board.arena().query(tile).owner(), Some(PlayerId::A));
    assert_eq!(board.verify(), Ok(()));
}

#[test]
fn test_capture_is_symmetric() {
    let mut board = board_with(&[(PlayerId::A, 0, 6), (PlayerId::B, 2, 4)]);

    let result = board.advance(PlayerId::B, 2, 2).unwrap();

    assert_eq!(result.captured, Some(0));
    assert_eq!(board.location(PlayerId::A, 0), Ok(PieceLocation::OffBoard));
    assert_eq!(board.verify(), Ok(()));
}

#[test]
fn test_captured_piece_can_reenter() {
    let mut board = board_with(&[(PlayerId::A, 1, 8), (PlayerId::B, 4, 10)]);
    board.advance(PlayerId::A, 1, 2).unwrap();

    let result = board.advance(PlayerId::B, 4, 1).unwrap();
    assert_eq!(result.to, PieceLocation::OnTrack(0));
}

#[test]
fn test_late_private_cells_never_capture() {
    // B sits on its own position 12; A's position 12 is a separate cell
    let mut board = board_with(&[(PlayerId::A, 0, 10), (PlayerId::B, 3, 12)]);

    let result = board.advance(PlayerId::A, 0, 2).unwrap();

    assert_eq!(result.to, PieceLocation::OnTrack(12));
    assert_eq!(result.captured, None);
    assert_eq!(board.location(PlayerId::B, 3), Ok(PieceLocation::OnTrack(12)));
}

// =============================================================================
// Rosettes
// =============================================================================

#[test]
fn test_opponent_on_shared_rosette_is_safe() {
    let mut board = board_with(&[(PlayerId::A, 0, 5), (PlayerId::B, 6, 7)]);
    let before = board.clone();

    let err = board.advance(PlayerId::A, 0, 2).unwrap_err();

    assert_eq!(err, RulesError::Rejected(Rejection::OpponentSafe { position: 7 }));
    assert_eq!(board, before);
}

#[test]
fn test_own_piece_on_rosette_blocks() {
    let mut board = board_with(&[(PlayerId::A, 0, 11), (PlayerId::A, 1, 13)]);
    let before = board.clone();

    let err = board.advance(PlayerId::A, 0, 2).unwrap_err();

    assert_eq!(err, RulesError::Rejected(Rejection::SelfOverlap { position: 13 }));
    assert_eq!(board, before);
}

#[test]
fn test_final_rosette_ignores_opponent() {
    let mut board = board_with(&[(PlayerId::A, 0, 11), (PlayerId::B, 5, 13)]);

    let result = board.advance(PlayerId::A, 0, 2).unwrap();

    assert_eq!(result.to, PieceLocation::OnTrack(13));
    assert!(result.landed_on_rosette);
    assert_eq!(result.captured, None);
}

#[test]
fn test_landing_on_rosettes() {
    let mut board = BoardState::new();

    assert!(board.advance(PlayerId::B, 0, 4).unwrap().landed_on_rosette);
    assert!(board.advance(PlayerId::B, 0, 4).unwrap().landed_on_rosette);
    assert!(!board.advance(PlayerId::B, 0, 1).unwrap().landed_on_rosette);
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_exact_roll_scores() {
    let mut board = board_with(&[(PlayerId::A, 2, 12)]);

    let result = board.advance(PlayerId::A, 2, 2).unwrap();

    assert!(result.scored);
    assert_eq!(result.to, PieceLocation::Scored);
    assert_eq!(board.score().get(PlayerId::A), 1);

    let last = board.track(PlayerId::A).cells()[13];
    assert_eq!(result.path.to_vec(), vec![Step::Cell(last), Step::Goal]);
    assert_eq!(board.arena().occupied_count(), 0);
}

#[test]
fn test_overshoot_rejected() {
    let mut board = board_with(&[(PlayerId::A, 2, 12)]);
    let before = board.clone();

    let err = board.advance(PlayerId::A, 2, 3).unwrap_err();

    assert_eq!(err, RulesError::Rejected(Rejection::Overshoot { position: 12, roll: 3 }));
    assert_eq!(board, before);
}

#[test]
fn test_scoring_from_rosette_grants_nothing_extra() {
    let mut board = board_with(&[(PlayerId::B, 0, 13)]);

    let result = board.advance(PlayerId::B, 0, 1).unwrap();

    assert!(result.scored);
    assert!(!result.landed_on_rosette);
}

#[test]
fn test_scoring_passes_through_final_rosette() {
    let mut board = board_with(&[(PlayerId::A, 0, 10)]);

    let result = board.advance(PlayerId::A, 0, 4).unwrap();

    let cells = board.track(PlayerId::A).cells();
    assert_eq!(
        result.path.to_vec(),
        vec![Step::Cell(cells[11]), Step::Cell(cells[12]), Step::Cell(cells[13]), Step::Goal]
    );
    assert!(!result.landed_on_rosette);
}

#[test]
fn test_scored_piece_cannot_move() {
    let mut board = BoardState::new();
    board.place(PlayerId::A, 5, PieceLocation::Scored).unwrap();

    assert_eq!(
        board.advance(PlayerId::A, 5, 1),
        Err(RulesError::AlreadyScored { player: PlayerId::A, piece: 5 })
    );
    assert!(!board.selectable_pieces(PlayerId::A, 1).contains(&5));
}

// =============================================================================
// Contract violations
// =============================================================================

#[test]
fn test_bad_arguments_leave_board_untouched() {
    let mut board = board_with(&[(PlayerId::A, 0, 3)]);
    let before = board.clone();

    assert_eq!(board.advance(PlayerId::A, 7, 1), Err(RulesError::InvalidPiece(7)));
    assert_eq!(board.advance(PlayerId::A, 0, 0), Err(RulesError::InvalidRoll(0)));
    assert_eq!(board.advance(PlayerId::A, 0, 5), Err(RulesError::InvalidRoll(5)));
    assert_eq!(board, before);
}
