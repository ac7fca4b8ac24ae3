//! Single-slot turn buffer.
//!
//! One `AtomicU8` holds either 0 (no request) or a [`Direction::code`]. Writers
//! overwrite, the reader swaps the slot back to 0, so a request is consumed exactly
//! once and at most one request is ever pending.

use std::sync::atomic::{AtomicU8, Ordering};

use tilt_snake_types::Direction;

const EMPTY: u8 = 0;

#[derive(Debug, Default)]
pub struct TurnSlot {
    code: AtomicU8,
}

impl TurnSlot {
    pub fn new() -> Self {
        Self {
            code: AtomicU8::new(EMPTY),
        }
    }

    /// Replace whatever is pending with `direction`.
    pub fn offer(&self, direction: Direction) {
        self.code.store(direction.code(), Ordering::Release);
    }

    /// Take the pending request, leaving the slot empty.
    pub fn take(&self) -> Option<Direction> {
        Direction::from_code(self.code.swap(EMPTY, Ordering::AcqRel))
    }

    /// Look at the pending request without consuming it.
    pub fn peek(&self) -> Option<Direction> {
        Direction::from_code(self.code.load(Ordering::Acquire))
    }
}
