//! The four binary tetrahedral dice.
//!
//! Each die shows a marked tip with probability one half, and the roll is
//! the number of marked tips: 0..=4 with binomial weights 1, 4, 6, 4, 1
//! out of 16.
//!
//! The turn controller takes its rolls from a [`DiceSource`], so a session
//! can be driven by [`TetrahedralDice`] (seeded) or by [`ScriptedDice`]
//! when a fixed sequence is wanted.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{GameRng, GameRngState, MAX_ROLL};

/// Number of dice thrown each turn.
pub const DICE_COUNT: usize = 4;

/// Something that produces rolls in `0..=4`.
pub trait DiceSource {
    /// Throw the dice.
    fn roll(&mut self) -> u8;

    /// Position of the underlying random stream, when there is one.
    fn rng_state(&self) -> Option<GameRngState> {
        None
    }
}

/// Dice roll helpers.
pub struct DiceRoll;

impl DiceRoll {
    /// Throw four fair binary dice and count the marked tips.
    pub fn roll(rng: &mut GameRng) -> u8 {
        let marked = (0..DICE_COUNT).filter(|_| rng.gen_bool(0.5)).count() as u8;
        trace!(marked, "dice thrown");
        marked
    }

    /// Probability of a particular roll.
    #[must_use]
    pub fn probability(value: u8) -> f64 {
        const WAYS: [u32; DICE_COUNT + 1] = [1, 4, 6, 4, 1];
        match WAYS.get(value as usize) {
            Some(&ways) => f64::from(ways) / 16.0,
            None => 0.0,
        }
    }
}

/// Seeded dice backed by a [`GameRng`].
#[derive(Clone, Debug)]
pub struct TetrahedralDice {
    rng: GameRng,
}

impl TetrahedralDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }

    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }
}

impl DiceSource for TetrahedralDice {
    fn roll(&mut self) -> u8 {
        DiceRoll::roll(&mut self.rng)
    }

    fn rng_state(&self) -> Option<GameRngState> {
        Some(self.rng.state())
    }
}

/// Replays a fixed sequence of rolls, cycling when it runs out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create from a non-empty sequence of values in `0..=4`.
    ///
    /// # Panics
    ///
    /// Panics if `rolls` is empty or holds a value above 4.
    #[must_use]
    pub fn new(rolls: Vec<u8>) -> Self {
        assert!(!rolls.is_empty(), "scripted dice need at least one roll");
        assert!(
            rolls.iter().all(|&r| r <= MAX_ROLL),
            "scripted rolls must be in 0..={MAX_ROLL}"
        );
        Self { rolls, cursor: 0 }
    }

    /// Rolls handed out so far.
    #[must_use]
    pub fn thrown(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}
