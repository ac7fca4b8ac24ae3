//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the Snake rules, state management, and simulation logic.
//! It has **zero dependencies** on timers, threads, UI, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same intents produce identical games
//! - **Testable**: Every rule is exercised by unit tests next to it
//! - **Portable**: Can be driven by any scheduler (tokio timer, render loop, test harness)
//!
//! # Module Structure
//!
//! - [`board`]: immutable grid dimensions and layout derivation
//! - [`snake`]: head-first body with a flat occupancy grid
//! - [`game_state`]: the single-step transition (turns, walls, self collisions, growth)
//! - [`rng`]: seeded food placement among free cells
//! - [`config`]: tunable parameters (serde + environment overrides)
//! - [`snapshot`]: read model for hosts
//!
//! # Game Rules
//!
//! - The snake moves one cell per tick in its current direction
//! - A buffered turn is adopted at the start of a tick unless it reverses into the neck
//! - Leaving the board or running into the body ends the game
//! - Eating food grows the snake by one cell and adds the configured reward
//! - Game over is terminal; further ticks do nothing
//!
//! # Example
//!
//! ```
//! use tilt_snake_core::{BoardSize, GameConfig, GameState, StepOutcome};
//! use tilt_snake_types::{Cell, Direction};
//!
//! let config = GameConfig::new(5, 5);
//! let board = config.board().unwrap();
//! let mut game =
//!     GameState::with_layout(&config, board, [Cell::new(2, 2)], Direction::Right, Cell::new(3, 2))
//!         .unwrap();
//!
//! let result = game.step(Some(Direction::Up));
//! assert_eq!(result.outcome, StepOutcome::Moved);
//! assert_eq!(game.snake().head(), Cell::new(2, 1));
//!
//! assert_eq!(BoardSize::from_layout(1500, 800, 15).unwrap().rows(), 8);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tilt_snake_types as types;

// Re-export commonly used types for convenience
pub use board::BoardSize;
pub use config::GameConfig;
pub use error::ConfigError;
pub use game_state::{GameState, StepEvent, StepOutcome, StepResult};
pub use rng::{FoodSpawner, SimpleRng};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
