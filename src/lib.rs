//! Tilt Snake (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tilt_snake::{core,engine,input,scheduler,term,types}` and adds
//! [`session::GameSession`], the wiring a host uses to run one game.

pub mod session;

pub use tilt_snake_core as core;
pub use tilt_snake_engine as engine;
pub use tilt_snake_input as input;
pub use tilt_snake_scheduler as scheduler;
pub use tilt_snake_term as term;
pub use tilt_snake_types as types;

pub use session::{GameSession, SessionError};
