//! Game configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Wheel labels are parsed into [`WheelPattern`]s while loading, so a bad
//! label fails here instead of in the middle of a match.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::phrases::Phrase;
use super::wheel::{default_patterns, WheelPattern};

/// Cost of buying a vowel.
pub const DEFAULT_VOWEL_COST: u32 = 500;

/// Bonus credited on top of the round score for solving.
pub const DEFAULT_SOLVE_BONUS: u32 = 1000;

/// Pause between a solved round and the next one.
pub const DEFAULT_ROUND_COUNTDOWN_SECS: u64 = 7;

/// Board dimensions.
pub const DEFAULT_BOARD_COLUMNS: usize = 14;
pub const DEFAULT_BOARD_ROWS: usize = 4;

/// Length of generated room codes.
pub const DEFAULT_ROOM_CODE_LENGTH: usize = 5;

/// Maximum players per room (spectators are not counted).
pub const DEFAULT_MAX_PLAYERS: usize = 6;

/// Upper bound on the rounds a host may ask for.
pub const DEFAULT_MAX_TOTAL_ROUNDS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub vowel_cost: u32,
    pub solve_bonus: u32,
    pub round_countdown_secs: u64,
    pub board_columns: usize,
    pub board_rows: usize,
    pub room_code_length: usize,
    pub max_players: usize,
    pub max_total_rounds: u32,
    pub wheel_patterns: Vec<WheelPattern>,
    pub phrases: Vec<Phrase>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vowel_cost: DEFAULT_VOWEL_COST,
            solve_bonus: DEFAULT_SOLVE_BONUS,
            round_countdown_secs: DEFAULT_ROUND_COUNTDOWN_SECS,
            board_columns: DEFAULT_BOARD_COLUMNS,
            board_rows: DEFAULT_BOARD_ROWS,
            room_code_length: DEFAULT_ROOM_CODE_LENGTH,
            max_players: DEFAULT_MAX_PLAYERS,
            max_total_rounds: DEFAULT_MAX_TOTAL_ROUNDS,
            wheel_patterns: default_patterns(),
            phrases: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wheel_patterns.is_empty() {
            return Err(ConfigError::Invalid("wheelPatterns must not be empty"));
        }
        if self.board_columns == 0 || self.board_rows == 0 {
            return Err(ConfigError::Invalid("board dimensions must be positive"));
        }
        if self.room_code_length < 3 {
            return Err(ConfigError::Invalid("roomCodeLength must be at least 3"));
        }
        if self.max_players == 0 {
            return Err(ConfigError::Invalid("maxPlayers must be positive"));
        }
        if self.max_total_rounds == 0 {
            return Err(ConfigError::Invalid("maxTotalRounds must be positive"));
        }
        if self.phrases.iter().any(|p| p.text.trim().is_empty()) {
            return Err(ConfigError::Invalid("phrases must not be blank"));
        }
        Ok(())
    }

    pub fn round_countdown(&self) -> Duration {
        Duration::from_secs(self.round_countdown_secs)
    }
}

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::wheel::Outcome;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.vowel_cost, 500);
        assert_eq!(config.solve_bonus, 1000);
        assert_eq!(config.round_countdown(), Duration::from_secs(7));
    }

    #[test]
    fn test_overrides_and_wheels() {
        let config = GameConfig::from_json(
            r#"{
                "vowelCost": 250,
                "wheelPatterns": [["100", "PASSA/BANCAROTTA"]],
                "phrases": [{"category": "PROVERBIO", "text": "CHI VA PIANO VA SANO"}]
            }"#,
        )
        .unwrap();
        assert_eq!(config.vowel_cost, 250);
        assert_eq!(config.board_columns, DEFAULT_BOARD_COLUMNS);
        assert_eq!(config.wheel_patterns.len(), 1);
        assert_eq!(
            config.wheel_patterns[0].resolve(300.0).unwrap().outcome,
            Outcome::Bankrupt
        );
        assert_eq!(config.phrases[0].category, "PROVERBIO");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"wheelPatterns": [["A/B/C"]]}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"wheelPatterns": []}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"boardRows": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(GameConfig::from_json("not json").is_err());
    }
}
