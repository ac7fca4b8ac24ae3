//! Accelerometer tilt → direction.
//!
//! Readings are in m/s² with the device held in landscape. The dominant axis wins;
//! a reading whose dominant magnitude is below the threshold is treated as "level"
//! and produces no intent.

use crate::types::{Direction, DEFAULT_TILT_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltMapper {
    threshold: f32,
}

impl Default for TiltMapper {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_TILT_THRESHOLD,
        }
    }
}

impl TiltMapper {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Map one `(x, y)` reading.
    ///
    /// In landscape the device X axis runs top-to-bottom of the screen and Y runs
    /// left-to-right, so positive X tilts the snake down and positive Y tilts it right.
    /// Ties go to the X axis.
    pub fn direction(&self, x: f32, y: f32) -> Option<Direction> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let (abs_x, abs_y) = (x.abs(), y.abs());
        if abs_x.max(abs_y) < self.threshold {
            return None;
        }

        if abs_x >= abs_y {
            Some(if x > 0.0 { Direction::Down } else { Direction::Up })
        } else {
            Some(if y > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        }
    }
}
