//! Construction-time errors.
//!
//! Everything that can go wrong during play is a game event, not an error; these
//! variants are only returned while building a board, a config or a game.

use thiserror::Error;

use crate::types::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {columns}x{rows} is below the minimum of {min}x{min}")]
    BoardTooSmall { columns: u16, rows: u16, min: u16 },

    #[error("layout width {width} cannot hold {columns} columns")]
    LayoutTooNarrow { width: u32, columns: u16 },

    #[error("initial snake length {length} must be between 1 and {max}")]
    InitialLengthOutOfRange { length: u16, max: u16 },

    #[error("food reward must be positive")]
    ZeroFoodReward,

    #[error("tick interval must be positive")]
    ZeroTickInterval,

    #[error("invalid snake body: {0}")]
    InvalidSnake(&'static str),

    #[error("food cell ({}, {}) overlaps the snake", .0.column, .0.row)]
    FoodOnSnake(Cell),

    #[error("invalid config document: {0}")]
    Parse(String),
}
