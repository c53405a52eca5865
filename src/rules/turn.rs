//! The turn state machine.
//!
//! ```text
//!            request_roll (roll > 0, some piece can move)
//!   Rolling ─────────────────────────────────────────────▶ Selecting
//!      ▲  │ request_roll (roll 0 or nothing movable), pass    │ choose_piece (rejected: stay)
//!      │  └───────────▶ hand over ──┐                         │ choose_piece (accepted)
//!      │                            ▼                         ▼
//!      └──────── confirm_playback_complete ─────────────── Moving
//!                (rosette: same player, else hand over)
//! ```
//!
//! A move is applied to the board in full inside `choose_piece`. The
//! `Moving` phase only waits for presentation to finish playing it back, so
//! the board is never observable in a half-applied state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::{AdvanceResult, BoardSnapshot, BoardState, GameScore, PieceLocation, Preview};
use crate::core::{GameConfig, GameRngState, PlayerId, RulesError, WINNING_SCORE};
use crate::events::{GameObserver, NullObserver};

use super::dice::{DiceSource, TetrahedralDice};
use super::engine::TrackRules;

/// Where the active player is within their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the dice.
    Rolling,
    /// Waiting for a piece to be chosen for the pending roll.
    Selecting,
    /// A move has been applied; waiting for playback to finish.
    Moving,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::Rolling => write!(f, "rolling"),
            TurnPhase::Selecting => write!(f, "selecting"),
            TurnPhase::Moving => write!(f, "moving"),
        }
    }
}

/// Phase, active player and pending roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: TurnPhase,
    pub active_player: PlayerId,
    /// Set from a successful roll until the turn resolves.
    pub pending_roll: Option<u8>,
}

impl TurnState {
    fn new(active_player: PlayerId) -> Self {
        Self {
            phase: TurnPhase::Rolling,
            active_player,
            pending_roll: None,
        }
    }
}

/// Drives a game one request at a time and reports to an observer.
///
/// ## Example
///
/// ```
/// use royal_ur::core::GameConfig;
/// use royal_ur::rules::{ScriptedDice, TurnController, TurnPhase};
///
/// let mut game = TurnController::new(GameConfig::default())
///     .with_dice(ScriptedDice::new(vec![4]));
///
/// assert_eq!(game.request_roll(), Ok(4));
/// let result = game.choose_piece(0).unwrap();
/// assert!(result.landed_on_rosette);
///
/// game.confirm_playback_complete().unwrap();
/// // rosette: the same player rolls again
/// assert_eq!(game.phase(), TurnPhase::Rolling);
/// assert_eq!(game.turn_number(), 1);
/// ```
pub struct TurnController<O: GameObserver = NullObserver> {
    board: BoardState,
    dice: Box<dyn DiceSource>,
    observer: O,
    state: TurnState,
    pending_move: Option<AdvanceResult>,
    turn_number: u32,
}

impl TurnController<NullObserver> {
    /// New game with nobody watching.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: GameObserver> TurnController<O> {
    /// New game reporting to `observer`, with seeded dice.
    pub fn with_observer(config: GameConfig, observer: O) -> Self {
        Self {
            board: BoardState::new(),
            dice: Box::new(TetrahedralDice::new(config.seed)),
            observer,
            state: TurnState::new(config.first_player),
            pending_move: None,
            turn_number: 1,
        }
    }

    /// Replace the dice.
    #[must_use]
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// Start from a prepared position instead of the empty board.
    #[must_use]
    pub fn with_board(mut self, board: BoardState) -> Self {
        self.board = board;
        self
    }

    // === Requests ===

    /// Throw the dice for the active player.
    ///
    /// A zero roll, or a roll no piece can use, forfeits the turn and hands
    /// over immediately. The roll is returned either way.
    #[instrument(skip(self), level = "debug")]
    pub fn request_roll(&mut self) -> Result<u8, RulesError> {
        self.ensure_not_over()?;
        self.ensure_phase(TurnPhase::Rolling, "roll")?;

        let player = self.state.active_player;
        let roll = self.dice.roll();
        debug!(%player, roll, "rolled");
        self.observer.on_dice_rolled(player, roll);

        if roll == 0 || !self.board.track(player).can_move(self.board.arena(), roll) {
            debug!(%player, roll, "no usable move, turn forfeited");
            self.observer.on_turn_forfeited(player, roll);
            self.hand_over();
            return Ok(roll);
        }

        self.state.phase = TurnPhase::Selecting;
        self.state.pending_roll = Some(roll);
        Ok(roll)
    }

    /// Move a piece with the pending roll.
    ///
    /// On a rejection the controller stays in `Selecting` and the observer
    /// hears `on_move_rejected`; the player chooses again with the same roll.
    #[instrument(skip(self), level = "debug")]
    pub fn choose_piece(&mut self, piece: u8) -> Result<AdvanceResult, RulesError> {
        self.ensure_phase(TurnPhase::Selecting, "choose a piece")?;
        let player = self.state.active_player;
        let roll = self.state.pending_roll.ok_or(RulesError::WrongPhase {
            action: "choose a piece",
            phase: self.state.phase,
        })?;

        let result = match self.board.advance(player, piece, roll) {
            Ok(result) => result,
            Err(RulesError::Rejected(reason)) => {
                debug!(%player, piece, roll, %reason, "move rejected");
                self.observer.on_move_rejected(player, piece, reason);
                return Err(reason.into());
            }
            Err(err) => return Err(err),
        };

        debug!(%player, piece, roll, from = ?result.from, to = ?result.to, "move applied");
        self.report(&result);

        self.state.phase = TurnPhase::Moving;
        self.pending_move = Some(result.clone());
        Ok(result)
    }

    /// Presentation has finished playing back the last move.
    ///
    /// A rosette landing gives the same player another roll; anything else
    /// hands the turn over. After the winning move control stays put.
    pub fn confirm_playback_complete(&mut self) -> Result<(), RulesError> {
        self.ensure_phase(TurnPhase::Moving, "confirm playback")?;

        let bonus = self
            .pending_move
            .take()
            .is_some_and(|result| result.landed_on_rosette);

        if bonus || self.winner().is_some() {
            if bonus {
                debug!(player = %self.state.active_player, "rosette, rolling again");
            }
            self.state.phase = TurnPhase::Rolling;
            self.state.pending_roll = None;
        } else {
            self.hand_over();
        }
        Ok(())
    }

    /// Give up the turn without rolling.
    pub fn pass(&mut self) -> Result<(), RulesError> {
        self.ensure_not_over()?;
        self.ensure_phase(TurnPhase::Rolling, "pass")?;
        debug!(player = %self.state.active_player, "passed");
        self.hand_over();
        Ok(())
    }

    // === Queries ===

    /// Pieces that can use the pending roll. Empty outside `Selecting`.
    #[must_use]
    pub fn selectable_pieces(&self) -> FxHashSet<u8> {
        match (self.state.phase, self.state.pending_roll) {
            (TurnPhase::Selecting, Some(roll)) => {
                self.board.selectable_pieces(self.state.active_player, roll)
            }
            _ => FxHashSet::default(),
        }
    }

    /// Where the pending roll would take a piece.
    pub fn preview(&self, piece: u8) -> Result<Preview, RulesError> {
        self.ensure_phase(TurnPhase::Selecting, "preview a move")?;
        let roll = self.state.pending_roll.ok_or(RulesError::WrongPhase {
            action: "preview a move",
            phase: self.state.phase,
        })?;
        self.board.preview(self.state.active_player, piece, roll)
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player
    }

    #[must_use]
    pub fn pending_roll(&self) -> Option<u8> {
        self.state.pending_roll
    }

    /// The move being played back, while in `Moving`.
    #[must_use]
    pub fn pending_move(&self) -> Option<&AdvanceResult> {
        self.pending_move.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> &GameScore {
        self.board.score()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.board.score().winner()
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Starts at 1 and increases each time control changes hands.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Dice stream position, for reproducing a game.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        self.dice.rng_state()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    // === Internals ===

    fn ensure_phase(&self, expected: TurnPhase, action: &'static str) -> Result<(), RulesError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(RulesError::WrongPhase {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn ensure_not_over(&self) -> Result<(), RulesError> {
        match self.winner() {
            Some(winner) => Err(RulesError::GameOver(winner)),
            None => Ok(()),
        }
    }

    /// Tell the observer about an applied move.
    fn report(&mut self, result: &AdvanceResult) {
        let player = result.player;
        self.observer.on_pieces_pathed(player, result.piece, &result.path);

        if let Some(captured) = result.captured {
            self.observer.on_piece_captured(player.opponent(), captured);
        }

        if result.scored {
            let score = self.board.score().get(player);
            self.observer.on_piece_scored(player, result.piece);
            self.observer.on_score_changed(player, score);
            if score == WINNING_SCORE {
                info!(%player, "game won");
                self.observer.on_game_won(player);
            }
        }

        if result.landed_on_rosette {
            if let PieceLocation::OnTrack(position) = result.to {
                self.observer.on_rosette_landed(player, position);
            }
        }
    }

    fn hand_over(&mut self) {
        let next = self.state.active_player.opponent();
        self.state = TurnState::new(next);
        self.pending_move = None;
        self.turn_number += 1;
        debug!(player = %next, turn = self.turn_number, "turn changed");
        self.observer.on_turn_changed(next);
    }
}

impl<O: GameObserver + std::fmt::Debug> std::fmt::Debug for TurnController<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("state", &self.state)
            .field("turn_number", &self.turn_number)
            .field("score", self.board.score())
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}
