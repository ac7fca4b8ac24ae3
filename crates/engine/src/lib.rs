//! Engine module - the thread-safe face of the game
//!
//! [`tilt_snake_core::GameState`] is a plain single-threaded state machine. This crate
//! wraps it for hosts where ticks and input arrive on different threads:
//!
//! - [`SnakeEngine::step`] is serialized by a mutex; only one step mutates state at a time
//! - [`SnakeEngine::turn`] never blocks: it overwrites a single atomic slot that the next
//!   step takes (last request wins, nothing is queued)
//! - Score and game-over notifications are dispatched over a channel, so the host drains
//!   them on whatever thread owns its display instead of running inside the tick
//!
//! # Example
//!
//! ```
//! use tilt_snake_core::GameConfig;
//! use tilt_snake_engine::{EngineEvent, SnakeEngine, StepOutcome};
//! use tilt_snake_types::{Cell, Direction, GameStatus};
//!
//! let config = GameConfig::new(5, 5);
//! let board = config.board().unwrap();
//! let (engine, mut events) = SnakeEngine::with_layout(
//!     &config,
//!     board,
//!     [Cell::new(2, 2)],
//!     Direction::Right,
//!     Cell::new(3, 2),
//! )
//! .unwrap();
//!
//! assert_eq!(engine.step(), StepOutcome::Grew);
//! assert_eq!(events.try_recv(), Some(EngineEvent::ScoreChanged { score: 1 }));
//!
//! engine.turn(Direction::Up);
//! engine.step();
//! assert_eq!(engine.snapshot().head(), Some(Cell::new(3, 1)));
//! assert_eq!(engine.status(), GameStatus::Running);
//! ```

pub mod slot;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

pub use tilt_snake_core as core;
pub use tilt_snake_types as types;

pub use slot::TurnSlot;
pub use tilt_snake_core::{StepEvent as EngineEvent, StepOutcome};

use tilt_snake_core::{BoardSize, ConfigError, GameConfig, GameSnapshot, GameState};
use tilt_snake_types::{Cell, Direction, GameStatus};

/// Receiving end of the engine's host notifications.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl EventReceiver {
    /// Next pending event, without waiting.
    pub fn try_recv(&mut self) -> Option<EngineEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event. `None` once the engine is dropped and drained.
    pub async fn recv(&mut self) -> Option<EngineEvent> {
        self.rx.recv().await
    }

    /// Everything currently queued, oldest first.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[derive(Debug)]
struct Inner {
    state: GameState,
    /// Set by [`SnakeEngine::halt`]; checked under the same lock as every step.
    halted: bool,
}

/// Thread-safe Snake engine.
///
/// Share it behind an `Arc`: the scheduler calls [`SnakeEngine::step`], input sources
/// call [`SnakeEngine::turn`], the host reads [`SnakeEngine::snapshot`].
#[derive(Debug)]
pub struct SnakeEngine {
    inner: Mutex<Inner>,
    pending: TurnSlot,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl SnakeEngine {
    /// Build a new game on `board`.
    pub fn new(
        config: &GameConfig,
        board: BoardSize,
    ) -> Result<(Self, EventReceiver), ConfigError> {
        let state = GameState::new(config, board)?;
        Ok(Self::from_state(state))
    }

    /// Build a game from an explicit snake and food layout.
    pub fn with_layout(
        config: &GameConfig,
        board: BoardSize,
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
        food: Cell,
    ) -> Result<(Self, EventReceiver), ConfigError> {
        let state = GameState::with_layout(config, board, body, direction, food)?;
        Ok(Self::from_state(state))
    }

    pub fn from_state(state: GameState) -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        debug!(
            columns = state.board().columns(),
            rows = state.board().rows(),
            length = state.snake().len(),
            "engine created"
        );
        let engine = Self {
            inner: Mutex::new(Inner {
                state,
                halted: false,
            }),
            pending: TurnSlot::new(),
            events: tx,
        };
        (engine, EventReceiver { rx })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // State is only written after every check has passed, so a panic elsewhere
        // cannot leave it half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Request a new heading for the next tick.
    ///
    /// Overwrites any earlier request. A request pointing back into the neck is
    /// dropped by the next step.
    pub fn turn(&self, direction: Direction) {
        trace!(direction = direction.as_str(), "turn requested");
        self.pending.offer(direction);
    }

    /// The tick contract: advance the game by one cell.
    ///
    /// No-op (returns [`StepOutcome::Idle`]) while paused, after game over and after
    /// [`SnakeEngine::halt`].
    pub fn step(&self) -> StepOutcome {
        let mut inner = self.lock();
        if inner.halted || inner.state.status() != GameStatus::Running {
            return StepOutcome::Idle;
        }

        let intent = self.pending.take();
        if let Some(direction) = intent {
            if !inner.state.accepts_turn(direction) {
                trace!(direction = direction.as_str(), "reverse turn ignored");
            }
        }

        let result = inner.state.step(intent);
        trace!(step = inner.state.steps(), outcome = ?result.outcome, "tick");

        for event in result.events {
            if let EngineEvent::GameOver { reason, score } = event {
                info!(reason = reason.as_str(), score, "game over");
            }
            // A dropped receiver means the host stopped listening; play goes on.
            let _ = self.events.send(event);
        }

        result.outcome
    }

    /// Host went to the background. Returns true if the game was running.
    pub fn pause(&self) -> bool {
        let paused = self.lock().state.pause();
        if paused {
            debug!("engine paused");
        }
        paused
    }

    /// Host is visible again. Returns true if the game was paused.
    pub fn resume(&self) -> bool {
        let resumed = self.lock().state.resume();
        if resumed {
            debug!("engine resumed");
        }
        resumed
    }

    /// Permanently refuse further steps. Once this returns, no step is in flight
    /// and none will change state.
    pub fn halt(&self) {
        let mut inner = self.lock();
        if !inner.halted {
            inner.halted = true;
            debug!("engine halted");
        }
    }

    pub fn is_halted(&self) -> bool {
        self.lock().halted
    }

    pub fn status(&self) -> GameStatus {
        self.lock().state.status()
    }

    pub fn score(&self) -> u32 {
        self.lock().state.score()
    }

    pub fn board(&self) -> BoardSize {
        self.lock().state.board()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tilt_snake_types::GameOverReason;

    fn engine(
        body: &[(u16, u16)],
        direction: Direction,
        food: (u16, u16),
    ) -> (SnakeEngine, EventReceiver) {
        let config = GameConfig::new(5, 5);
        SnakeEngine::with_layout(
            &config,
            config.board().unwrap(),
            body.iter().map(|&c| Cell::from(c)),
            direction,
            food.into(),
        )
        .unwrap()
    }

    #[test]
    fn test_last_turn_wins() {
        let (engine, _events) = engine(&[(2, 2)], Direction::Right, (0, 0));
        engine.turn(Direction::Up);
        engine.turn(Direction::Down);
        engine.step();
        assert_eq!(engine.snapshot().head(), Some(Cell::new(2, 3)));
    }

    #[test]
    fn test_turn_slot_is_cleared_by_step() {
        let (engine, _events) = engine(&[(1, 1)], Direction::Right, (0, 0));
        engine.turn(Direction::Down);
        engine.step();
        engine.step();
        let snap = engine.snapshot();
        assert_eq!(snap.direction, Direction::Down);
        assert_eq!(snap.head(), Some(Cell::new(1, 3)));
    }

    #[test]
    fn test_game_over_notified_once() {
        let (engine, mut events) = engine(&[(4, 2)], Direction::Right, (0, 0));
        assert_eq!(
            engine.step(),
            StepOutcome::GameOver(GameOverReason::Wall)
        );
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.step(), StepOutcome::Idle);

        assert_eq!(
            events.drain(),
            vec![EngineEvent::GameOver {
                reason: GameOverReason::Wall,
                score: 0
            }]
        );
    }

    #[test]
    fn test_paused_engine_keeps_pending_turn() {
        let (engine, _events) = engine(&[(2, 2)], Direction::Right, (0, 0));
        assert!(engine.pause());
        engine.turn(Direction::Up);
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert!(engine.resume());
        assert_eq!(engine.step(), StepOutcome::Moved);
        assert_eq!(engine.snapshot().head(), Some(Cell::new(2, 1)));
    }

    #[test]
    fn test_halt_blocks_steps() {
        let (engine, _events) = engine(&[(2, 2)], Direction::Right, (0, 0));
        engine.halt();
        assert!(engine.is_halted());
        assert_eq!(engine.step(), StepOutcome::Idle);
        assert_eq!(engine.snapshot().steps, 0);
        assert_eq!(engine.status(), GameStatus::Running);
    }

    #[test]
    fn test_dropped_receiver_does_not_stop_play() {
        let (engine, events) = engine(&[(1, 2)], Direction::Right, (2, 2));
        drop(events);
        assert_eq!(engine.step(), StepOutcome::Grew);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_concurrent_turns_and_steps() {
        let config = GameConfig::new(40, 40);
        let (engine, _events) = SnakeEngine::new(&config, config.board().unwrap()).unwrap();
        let engine = Arc::new(engine);

        let turner = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..10_000usize {
                    engine.turn(Direction::ALL[i % 4]);
                }
            })
        };

        for _ in 0..50 {
            engine.step();
            let snap = engine.snapshot();
            let mut cells = snap.body.clone();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), snap.body.len(), "body has duplicate cells");
        }

        turner.join().unwrap();
    }

    #[tokio::test]
    async fn test_async_receiver() {
        let (engine, mut events) = engine(&[(1, 2)], Direction::Right, (2, 2));
        let engine = Arc::new(engine);
        let stepper = Arc::clone(&engine);
        tokio::task::spawn_blocking(move || stepper.step())
            .await
            .unwrap();
        assert_eq!(
            events.recv().await,
            Some(EngineEvent::ScoreChanged { score: 1 })
        );
    }
}
