//! Intent sources (engine-facing).
//!
//! Hosts turn raw device input into [`crate::types::Direction`] intents and lifecycle
//! commands here, then hand them to the engine's `turn()` and the session controls.
//! Nothing in this crate talks to the engine directly.
//!
//! - [`tilt`]: accelerometer readings → direction, with a dead zone
//! - [`map`]: terminal key events → [`HostCommand`]

pub mod map;
pub mod tilt;

pub use tilt_snake_types as types;

pub use map::{handle_key_event, should_quit, HostCommand};
pub use tilt::TiltMapper;
