//! Snake body with a flat occupancy grid.
//!
//! The body is stored head-first in a `VecDeque` so that both ends move in O(1).
//! A row-major `Vec<bool>` mirrors the body for constant-time collision checks and
//! allocation-free food placement.

use std::collections::VecDeque;

use crate::board::BoardSize;
use crate::error::ConfigError;
use crate::types::{Cell, Direction};

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front.
    body: VecDeque<Cell>,
    direction: Direction,
    occupied: Vec<bool>,
    board: BoardSize,
}

impl Snake {
    /// Spawn a straight snake with its head at `head`, the tail trailing behind it
    /// (opposite to `direction`).
    pub fn spawn(
        board: BoardSize,
        head: Cell,
        direction: Direction,
        length: u16,
    ) -> Result<Self, ConfigError> {
        let (dc, dr) = direction.opposite().delta();
        let body = (0..length as i32)
            .map(|i| {
                board
                    .cell_at(head.column as i32 + dc * i, head.row as i32 + dr * i)
                    .ok_or(ConfigError::InvalidSnake("segment outside the board"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_body(board, body, direction)
    }

    /// Build a snake from explicit head-first segments.
    pub fn from_body(
        board: BoardSize,
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Result<Self, ConfigError> {
        let mut occupied = vec![false; board.area()];
        let mut segments = VecDeque::new();

        for cell in body {
            if !board.contains(cell.column as i32, cell.row as i32) {
                return Err(ConfigError::InvalidSnake("segment outside the board"));
            }
            let idx = board.index(cell);
            if occupied[idx] {
                return Err(ConfigError::InvalidSnake("duplicate segment"));
            }
            occupied[idx] = true;
            segments.push_back(cell);
        }

        if segments.is_empty() {
            return Err(ConfigError::InvalidSnake("empty body"));
        }

        Ok(Self {
            body: segments,
            direction,
            occupied,
            board,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Head-first iterator over the body.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied[self.board.index(cell)]
    }

    /// Number of board cells not covered by the snake.
    pub fn free_cells(&self) -> usize {
        self.board.area() - self.body.len()
    }

    /// The `n`-th free cell in row-major order, if any.
    pub fn nth_free_cell(&self, n: usize) -> Option<Cell> {
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, &taken)| !taken)
            .nth(n)
            .map(|(idx, _)| self.board.cell_from_index(idx))
    }

    /// Advance onto `head`. The tail is kept when `grow` is set.
    ///
    /// Callers must have ruled out walls and body collisions.
    pub fn advance(&mut self, head: Cell, grow: bool) {
        if !grow {
            if let Some(tail) = self.body.pop_back() {
                let idx = self.board.index(tail);
                self.occupied[idx] = false;
            }
        }
        let idx = self.board.index(head);
        self.occupied[idx] = true;
        self.body.push_front(head);
    }
}
