//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, scheduler wiring, terminal rendering, input mapping).
//!
//! # Board Geometry
//!
//! The board is a `columns x rows` grid addressed by [`Cell`]:
//!
//! - **Columns** grow to the right, starting at 0
//! - **Rows** grow downwards, starting at 0
//! - **Minimum size**: [`MIN_BOARD_DIM`] in both dimensions
//!
//! # Tunable Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 200 | Interval between two engine steps |
//! | `DEFAULT_FOOD_REWARD` | 1 | Score added per food consumed |
//! | `DEFAULT_COLUMNS` | 15 | Column count used to derive rows from a host layout |
//! | `DEFAULT_INITIAL_LENGTH` | 3 | Snake length at spawn |
//! | `DEFAULT_TILT_THRESHOLD` | 2.5 | Minimum accelerometer reading that counts as a turn |
//!
//! # Examples
//!
//! ```
//! use tilt_snake_types::{Cell, Direction};
//!
//! let head = Cell::new(2, 2);
//! assert_eq!(head.neighbor(Direction::Right), (3, 2));
//! assert_eq!(head.neighbor(Direction::Up), (2, 1));
//!
//! assert!(Direction::Left.is_opposite(Direction::Right));
//! ```

/// Smallest accepted board dimension (columns and rows).
pub const MIN_BOARD_DIM: u16 = 4;

/// Default interval between two ticks in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 200;

/// Default score awarded per food consumed.
pub const DEFAULT_FOOD_REWARD: u32 = 1;

/// Default number of board columns; rows are derived from the host layout.
pub const DEFAULT_COLUMNS: u16 = 15;

/// Default snake length at spawn.
pub const DEFAULT_INITIAL_LENGTH: u16 = 3;

/// Default accelerometer magnitude (m/s²) below which tilt is ignored.
pub const DEFAULT_TILT_THRESHOLD: f32 = 2.5;

/// Movement direction of the snake head.
///
/// Opposite pairs are `Up`/`Down` and `Left`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way.
    ///
    /// ```
    /// use tilt_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from `self` to `other` would be a 180-degree turn.
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector `(d_column, d_row)`; rows grow downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Compact non-zero code, used by lock-free single-slot buffers.
    pub fn code(&self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 3,
            Direction::Right => 4,
        }
    }

    /// Inverse of [`Direction::code`]. Zero and unknown codes map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// A `(column, row)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub column: u16,
    pub row: u16,
}

impl Cell {
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    /// Signed coordinates of the neighbouring cell in `direction`.
    ///
    /// The result may lie outside any board (including negative values),
    /// so callers bound-check before converting back into a [`Cell`].
    pub fn neighbor(&self, direction: Direction) -> (i32, i32) {
        let (dc, dr) = direction.delta();
        (self.column as i32 + dc, self.row as i32 + dr)
    }
}

impl From<(u16, u16)> for Cell {
    fn from((column, row): (u16, u16)) -> Self {
        Self { column, row }
    }
}

/// Lifecycle status of a game.
///
/// `Running <-> Paused` follows host visibility; `Running -> GameOver` happens on a
/// fatal collision. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver)
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The head left the board.
    Wall,
    /// The head ran into the body.
    SelfCollision,
    /// The snake covers every cell; no room left for food.
    BoardFull,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "wall",
            GameOverReason::SelfCollision => "selfCollision",
            GameOverReason::BoardFull => "boardFull",
        }
    }
}
