//! Game rules: movement contract, dice and the turn state machine.
//!
//! `TrackRules` is the seam between a player's path and everything that
//! drives it. `TurnController` sequences rolls, piece choices and playback
//! and reports each step to a `GameObserver`.

pub mod engine;
pub mod dice;
pub mod turn;

pub use engine::TrackRules;
pub use dice::{DiceRoll, DiceSource, ScriptedDice, TetrahedralDice, DICE_COUNT};
pub use turn::{TurnController, TurnPhase, TurnState};
