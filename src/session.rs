//! GameSession: one engine plus one tick scheduler, built from one config.
//!
//! The host owns the session and forwards its lifecycle to it:
//!
//! - `start()` once the board is laid out
//! - `pause()` / `resume()` when the game leaves or regains the screen
//! - `stop()` on teardown
//! - `restart()` to throw the current game away and begin a fresh one
//!
//! A stopped scheduler never ticks again, so `restart()` replaces the engine, the
//! scheduler and the event receiver wholesale.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::core::{BoardSize, ConfigError, GameConfig, GameSnapshot};
use crate::engine::{EngineEvent, EventReceiver, SnakeEngine, StepOutcome};
use crate::input::TiltMapper;
use crate::scheduler::{SchedulerError, SchedulerPhase, TickFlow, TickScheduler};
use crate::types::{Direction, GameStatus};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// The parts that are rebuilt on restart.
#[derive(Debug)]
struct Parts {
    engine: Arc<SnakeEngine>,
    scheduler: TickScheduler,
    events: EventReceiver,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    board: BoardSize,
    runtime: Option<Handle>,
    tilt: TiltMapper,
    started: bool,
    parts: Parts,
}

impl GameSession {
    /// Build a session whose scheduler runs on its own timer thread.
    pub fn new(config: GameConfig, board: BoardSize) -> Result<Self, SessionError> {
        Self::build(config, board, None)
    }

    /// Build a session whose scheduler spawns onto an existing tokio runtime.
    pub fn on_handle(
        handle: Handle,
        config: GameConfig,
        board: BoardSize,
    ) -> Result<Self, SessionError> {
        Self::build(config, board, Some(handle))
    }

    fn build(
        config: GameConfig,
        board: BoardSize,
        runtime: Option<Handle>,
    ) -> Result<Self, SessionError> {
        let parts = Parts::new(&config, board, runtime.clone())?;
        Ok(Self {
            config,
            board,
            runtime,
            tilt: TiltMapper::default(),
            started: false,
            parts,
        })
    }

    /// Replace the tilt mapper (e.g. a different threshold).
    pub fn with_tilt(mut self, tilt: TiltMapper) -> Self {
        self.tilt = tilt;
        self
    }

    /// Begin play. Returns false if the session was already started or stopped.
    pub fn start(&mut self) -> bool {
        if !self.parts.scheduler.start() {
            return false;
        }
        self.started = true;
        info!(
            columns = self.board.columns(),
            rows = self.board.rows(),
            tick_ms = self.config.tick_ms,
            "session started"
        );
        true
    }

    /// Freeze the game. Both the timer and the engine stop advancing.
    ///
    /// No-op unless the session is running; the engine follows the scheduler only
    /// when the scheduler actually changed phase.
    pub fn pause(&self) -> bool {
        let paused = self.parts.scheduler.pause();
        if paused {
            self.parts.engine.pause();
        }
        paused
    }

    /// No-op unless the session is paused.
    pub fn resume(&self) -> bool {
        let resumed = self.parts.scheduler.resume();
        if resumed {
            self.parts.engine.resume();
        }
        resumed
    }

    /// Toggle between paused and running; used by hosts with a single pause key.
    pub fn toggle_pause(&self) -> bool {
        match self.parts.scheduler.phase() {
            SchedulerPhase::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Tear down. No tick runs once this returns.
    pub fn stop(&self) {
        self.parts.scheduler.stop();
        self.parts.engine.halt();
        debug!("session stopped");
    }

    /// Discard the current game and start a fresh one from the same config and board.
    ///
    /// Events still queued for the old game are dropped with it.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.stop();
        self.parts = Parts::new(&self.config, self.board, self.runtime.clone())?;
        self.started = false;
        self.start();
        info!("session restarted");
        Ok(())
    }

    /// Forward a direction intent. Ignored until the session has started.
    pub fn turn(&self, direction: Direction) -> bool {
        if !self.started {
            return false;
        }
        self.parts.engine.turn(direction);
        true
    }

    /// Forward an accelerometer reading. Returns the direction it was mapped to, if
    /// the reading was strong enough and the session has started.
    pub fn on_tilt(&self, x: f32, y: f32) -> Option<Direction> {
        let direction = self.tilt.direction(x, y)?;
        self.turn(direction).then_some(direction)
    }

    /// All events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.parts.events.drain()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.parts.engine.snapshot()
    }

    pub fn status(&self) -> GameStatus {
        self.parts.engine.status()
    }

    pub fn score(&self) -> u32 {
        self.parts.engine.score()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.parts.scheduler.phase()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    /// The engine behind the current game, for hosts that drive steps themselves.
    pub fn engine(&self) -> &Arc<SnakeEngine> {
        &self.parts.engine
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Parts {
    fn new(
        config: &GameConfig,
        board: BoardSize,
        runtime: Option<Handle>,
    ) -> Result<Self, SessionError> {
        let (engine, events) = SnakeEngine::new(config, board)?;
        let engine = Arc::new(engine);

        let ticking = Arc::clone(&engine);
        let on_tick = move || match ticking.step() {
            StepOutcome::GameOver(_) => TickFlow::Halt,
            _ => TickFlow::Continue,
        };

        let interval = Duration::from_millis(config.tick_ms);
        let scheduler = match runtime {
            Some(handle) => TickScheduler::on_handle(handle, interval, on_tick)?,
            None => TickScheduler::new(interval, on_tick)?,
        };

        Ok(Self {
            engine,
            scheduler,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let mut config = GameConfig::new(10, 10);
        config.tick_ms = 50;
        let board = config.board().unwrap();
        GameSession::new(config, board).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::new(10, 10);
        config.food_reward = 0;
        let board = config.board().unwrap();
        assert!(matches!(
            GameSession::new(config, board),
            Err(SessionError::Config(ConfigError::ZeroFoodReward))
        ));
    }

    #[test]
    fn test_turn_ignored_before_start() {
        let mut session = session();
        assert!(!session.turn(Direction::Up));
        assert_eq!(session.on_tilt(9.0, 0.0), None);

        assert!(session.start());
        assert!(session.turn(Direction::Up));
        assert_eq!(session.on_tilt(0.0, -9.0), Some(Direction::Left));
        assert_eq!(session.on_tilt(1.0, 1.0), None);
        session.stop();
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut session = session();
        assert!(session.start());
        assert!(!session.start());
        session.stop();
        assert!(!session.start());
        assert_eq!(session.phase(), SchedulerPhase::Stopped);
    }

    #[test]
    fn test_pause_freezes_engine_and_timer() {
        let mut session = session();
        session.start();
        assert!(session.pause());
        assert_eq!(session.phase(), SchedulerPhase::Paused);
        assert_eq!(session.status(), GameStatus::Paused);

        assert!(session.toggle_pause());
        assert_eq!(session.phase(), SchedulerPhase::Running);
        assert_eq!(session.status(), GameStatus::Running);
        session.stop();
    }

    #[test]
    fn test_pause_before_start_is_noop() {
        let mut config = GameConfig::new(20, 20);
        config.tick_ms = 10;
        let board = config.board().unwrap();
        let mut session = GameSession::new(config, board).unwrap();

        assert!(!session.pause());
        assert!(!session.resume());
        assert_eq!(session.phase(), SchedulerPhase::Idle);
        assert_eq!(session.status(), GameStatus::Running);

        assert!(session.start());
        let start = std::time::Instant::now();
        while session.snapshot().steps == 0 && start.elapsed() < Duration::from_secs(2) {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(session.phase(), SchedulerPhase::Running);
        assert_eq!(session.status(), GameStatus::Running);
        assert!(session.snapshot().steps > 0);
        session.stop();
    }

    #[test]
    fn test_pause_after_stop_is_noop() {
        let mut session = session();
        session.start();
        session.stop();
        assert!(!session.pause());
        assert!(!session.resume());
        assert_eq!(session.status(), GameStatus::Running);
    }

    #[test]
    fn test_restart_replaces_stopped_session() {
        let mut session = session();
        session.start();
        session.stop();
        assert_eq!(session.phase(), SchedulerPhase::Stopped);

        session.restart().unwrap();
        assert!(session.is_started());
        assert_eq!(session.phase(), SchedulerPhase::Running);
        assert_eq!(session.snapshot().score, 0);
        session.stop();
    }
}
