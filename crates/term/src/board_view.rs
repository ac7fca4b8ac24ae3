//! BoardView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, GameStatus};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lines reserved above the board for the status text.
const HEADER_ROWS: u16 = 2;

const CELL_LIGHT: Rgb = Rgb::new(170, 215, 81);
const CELL_DARK: Rgb = Rgb::new(162, 209, 73);
const SNAKE_BODY: Rgb = Rgb::new(78, 124, 246);
const SNAKE_HEAD: Rgb = Rgb::new(40, 80, 200);
const FOOD: Rgb = Rgb::new(231, 71, 29);
const TEXT: Rgb = Rgb::new(230, 230, 230);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the Snake board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Space available to the board, in board cells.
    ///
    /// Hosts feed this to `GameConfig::board_for_layout` so that the board fits the
    /// terminal.
    pub fn layout_units(&self, viewport: Viewport) -> (u32, u32) {
        (
            (viewport.width / self.cell_w) as u32,
            viewport.height.saturating_sub(HEADER_ROWS) as u32,
        )
    }

    /// Render the snapshot into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let text = CellStyle::new(TEXT, BLACK);
        fb.put_str(0, 0, &format!("Score: {}", snap.score), text.bold());
        let status = match snap.status {
            GameStatus::Running => String::from("arrows/WASD turn  p pause  r restart  q quit"),
            GameStatus::Paused => String::from("PAUSED - p to resume"),
            GameStatus::GameOver => format!(
                "GAME OVER ({}) - r to restart",
                snap.game_over_reason.map(|r| r.as_str()).unwrap_or("?")
            ),
        };
        fb.put_str(12, 0, &status, text);

        let board_w = snap.columns.saturating_mul(self.cell_w);
        let origin_x = viewport.width.saturating_sub(board_w) / 2;
        let origin_y = HEADER_ROWS;

        for row in 0..snap.rows {
            for column in 0..snap.columns {
                let bg = if (column + row) % 2 == 0 {
                    CELL_LIGHT
                } else {
                    CELL_DARK
                };
                let cell = Cell::new(column, row);
                self.paint(fb, origin_x, origin_y, cell, ' ', CellStyle::new(BLACK, bg));
            }
        }

        if let Some(food) = snap.food {
            self.paint(fb, origin_x, origin_y, food, ' ', CellStyle::new(BLACK, FOOD));
        }

        for (i, cell) in snap.body.iter().enumerate() {
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            self.paint(fb, origin_x, origin_y, *cell, ' ', CellStyle::new(BLACK, color));
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn paint(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        cell: Cell,
        ch: char,
        style: CellStyle,
    ) {
        let x = origin_x.saturating_add(cell.column.saturating_mul(self.cell_w));
        let y = origin_y.saturating_add(cell.row);
        for dx in 0..self.cell_w {
            fb.put_char(x.saturating_add(dx), y, ch, style);
        }
    }
}
