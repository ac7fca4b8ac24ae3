//! Board module - fixed grid dimensions
//!
//! The board is an immutable `columns x rows` rectangle. It owns no cell contents;
//! the snake keeps its own occupancy grid indexed with [`BoardSize::index`].
//! Coordinates: (column, row) where column grows to the right and row grows downwards.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Cell, MIN_BOARD_DIM};

/// Board dimensions, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoardSize")]
pub struct BoardSize {
    columns: u16,
    rows: u16,
}

#[derive(Deserialize)]
struct RawBoardSize {
    columns: u16,
    rows: u16,
}

impl TryFrom<RawBoardSize> for BoardSize {
    type Error = ConfigError;

    fn try_from(raw: RawBoardSize) -> Result<Self, Self::Error> {
        BoardSize::new(raw.columns, raw.rows)
    }
}

impl BoardSize {
    /// Create a board, rejecting anything smaller than [`MIN_BOARD_DIM`] on either axis.
    pub fn new(columns: u16, rows: u16) -> Result<Self, ConfigError> {
        if columns < MIN_BOARD_DIM || rows < MIN_BOARD_DIM {
            return Err(ConfigError::BoardTooSmall {
                columns,
                rows,
                min: MIN_BOARD_DIM,
            });
        }
        Ok(Self { columns, rows })
    }

    /// Derive a board from a host layout measured in arbitrary units (pixels,
    /// terminal cells): square cells are `width / columns` wide and as many rows
    /// as fit in `height` are used. Leftover space is the host's padding.
    ///
    /// ```
    /// use tilt_snake_core::BoardSize;
    ///
    /// let board = BoardSize::from_layout(1500, 800, 15).unwrap();
    /// assert_eq!((board.columns(), board.rows()), (15, 8));
    /// ```
    pub fn from_layout(width: u32, height: u32, columns: u16) -> Result<Self, ConfigError> {
        if columns == 0 || width < columns as u32 {
            return Err(ConfigError::LayoutTooNarrow { width, columns });
        }
        let cell_size = width / columns as u32;
        let rows = (height / cell_size).min(u16::MAX as u32) as u16;
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check if signed coordinates fall inside the board
    pub fn contains(&self, column: i32, row: i32) -> bool {
        column >= 0 && column < self.columns as i32 && row >= 0 && row < self.rows as i32
    }

    /// Convert signed coordinates into a [`Cell`], or `None` when off-board.
    pub fn cell_at(&self, column: i32, row: i32) -> Option<Cell> {
        if self.contains(column, row) {
            Some(Cell::new(column as u16, row as u16))
        } else {
            None
        }
    }

    /// Row-major flat index of an on-board cell.
    #[inline(always)]
    pub fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.columns as usize + cell.column as usize
    }

    /// Inverse of [`BoardSize::index`].
    #[inline(always)]
    pub fn cell_from_index(&self, index: usize) -> Cell {
        let columns = self.columns as usize;
        Cell::new((index % columns) as u16, (index / columns) as u16)
    }

    /// The spawn cell: board centre, rounded towards the top-left.
    pub fn center(&self) -> Cell {
        Cell::new((self.columns - 1) / 2, (self.rows - 1) / 2)
    }
}
