//! Tick scheduler - fixed-period driver for the game step
//!
//! The scheduler owns only a timer. It never touches game state; it calls one
//! registered callback per period and lets the host control its lifecycle:
//!
//! | Call | From | To |
//! |------|------|----|
//! | `start()` | Idle | Running |
//! | `pause()` | Running | Paused |
//! | `resume()` | Paused | Running |
//! | `stop()` | any | Stopped (final) |
//!
//! Any other call is a no-op. Ticks never overlap: the callback runs inside the timer
//! task, and periods missed while it runs are skipped rather than replayed.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tilt_snake_scheduler::{TickFlow, TickScheduler};
//!
//! let scheduler = TickScheduler::new(Duration::from_millis(200), || {
//!     // advance the game here
//!     TickFlow::Continue
//! })
//! .unwrap();
//!
//! scheduler.start();
//! scheduler.pause();
//! scheduler.resume();
//! scheduler.stop();
//! ```

pub mod error;
pub mod scheduler;

pub use error::SchedulerError;
pub use scheduler::{SchedulerHandle, SchedulerPhase, TickFlow, TickScheduler};
