//! Terminal "board renderer" module.
//!
//! This is a small rendering layer for the terminal demo host. It renders a
//! [`core::GameSnapshot`] into a simple framebuffer that can be flushed to a
//! terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and free of presentation concerns
//! - Redraw only what changed between frames
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use tilt_snake_core as core;
pub use tilt_snake_types as types;

pub use board_view::{BoardView, Viewport};
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
