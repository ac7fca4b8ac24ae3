//! Game configuration - defaults, `SNAKE_*` environment overrides and JSON loading

use serde::{Deserialize, Serialize};

use crate::board::BoardSize;
use crate::error::ConfigError;
use crate::types::{
    DEFAULT_COLUMNS, DEFAULT_FOOD_REWARD, DEFAULT_INITIAL_LENGTH, DEFAULT_TICK_MS,
};

/// Tunable game parameters.
///
/// Missing fields in a JSON document fall back to [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board columns
    pub columns: u16,
    /// Number of board rows; derived from the host layout when `None`
    pub rows: Option<u16>,
    /// Length of the snake at spawn
    pub initial_length: u16,
    /// Score added per food consumed
    pub food_reward: u32,
    /// Tick interval in milliseconds
    pub tick_ms: u64,
    /// Seed for food placement
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: None,
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_reward: DEFAULT_FOOD_REWARD,
            tick_ms: DEFAULT_TICK_MS,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a fixed board size
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows: Some(rows),
            ..Default::default()
        }
    }

    /// Apply `SNAKE_*` environment overrides on top of `self`.
    ///
    /// Unset or unparseable variables leave the current value in place.
    pub fn with_env(self) -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        Self {
            columns: parsed("SNAKE_COLUMNS").unwrap_or(self.columns),
            rows: parsed("SNAKE_ROWS").or(self.rows),
            initial_length: parsed("SNAKE_INITIAL_LENGTH").unwrap_or(self.initial_length),
            food_reward: parsed("SNAKE_FOOD_REWARD").unwrap_or(self.food_reward),
            tick_ms: parsed("SNAKE_TICK_MS").unwrap_or(self.tick_ms),
            seed: parsed("SNAKE_SEED").unwrap_or(self.seed),
        }
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Parse a JSON document; absent fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the board: configured rows win, otherwise rows are derived from the
    /// host layout (`width x height` in host units).
    pub fn board_for_layout(&self, width: u32, height: u32) -> Result<BoardSize, ConfigError> {
        match self.rows {
            Some(rows) => BoardSize::new(self.columns, rows),
            None => BoardSize::from_layout(width, height, self.columns),
        }
    }

    /// Board from configured dimensions only.
    pub fn board(&self) -> Result<BoardSize, ConfigError> {
        BoardSize::new(self.columns, self.rows.unwrap_or(self.columns))
    }

    /// Check the game parameters against a concrete board.
    ///
    /// The snake spawns at the centre heading right, so its tail needs room on the
    /// left half of the board.
    pub fn validate(&self, board: BoardSize) -> Result<(), ConfigError> {
        if self.food_reward == 0 {
            return Err(ConfigError::ZeroFoodReward);
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let max = board.center().column + 1;
        if self.initial_length == 0 || self.initial_length > max {
            return Err(ConfigError::InitialLengthOutOfRange {
                length: self.initial_length,
                max,
            });
        }
        Ok(())
    }
}
