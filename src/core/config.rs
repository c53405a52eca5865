//! Game configuration and board constants.
//!
//! The rules themselves are fixed: track geometry, rosette positions, piece
//! count and the winning score are constants. `GameConfig` only carries what
//! legitimately differs between two sessions of the same game.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Number of cells on each player's path.
pub const TRACK_LEN: usize = 14;

/// Pieces per player.
pub const PIECES_PER_PLAYER: usize = 7;

/// Score at which a player has won (every piece borne off).
pub const WINNING_SCORE: u8 = PIECES_PER_PLAYER as u8;

/// Local path positions that carry a rosette.
pub const ROSETTES: [usize; 3] = [3, 7, 13];

/// Local path positions shared by both tracks.
pub const SHARED_POSITIONS: std::ops::RangeInclusive<usize> = 4..=11;

/// Number of physical cells on the board (8 shared + 6 private per player).
pub const BOARD_TILES: usize = 20;

/// Largest value the four binary dice can show.
pub const MAX_ROLL: u8 = 4;

/// Whether a local path position carries a rosette.
#[must_use]
pub fn is_rosette(position: usize) -> bool {
    ROSETTES.contains(&position)
}

/// Whether a local path position lies in the shared zone.
#[must_use]
pub fn is_shared(position: usize) -> bool {
    SHARED_POSITIONS.contains(&position)
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the dice stream.
    /// Same seed and same piece choices replay the same game.
    pub seed: u64,

    /// Player who rolls first.
    pub first_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            first_player: PlayerId::A,
        }
    }
}

impl GameConfig {
    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the opening player.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.first_player, PlayerId::A);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_first_player(PlayerId::B);

        assert_eq!(config.seed, 123);
        assert_eq!(config.first_player, PlayerId::B);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_geometry_constants() {
        assert_eq!(SHARED_POSITIONS.clone().count(), 8);
        assert_eq!(BOARD_TILES, 8 + 2 * (TRACK_LEN - 8));
        assert!(is_rosette(3) && is_rosette(7) && is_rosette(13));
        assert!(!is_rosette(0) && !is_rosette(12));
        assert!(is_shared(7));
        assert!(!is_shared(3) && !is_shared(12));
    }
}
