//! GameSession wiring: engine + scheduler + events + intent sources

use std::thread;
use std::time::{Duration, Instant};

use tilt_snake::core::GameConfig;
use tilt_snake::engine::EngineEvent;
use tilt_snake::input::TiltMapper;
use tilt_snake::scheduler::SchedulerPhase;
use tilt_snake::types::{Direction, GameOverReason, GameStatus};
use tilt_snake::GameSession;

fn config(columns: u16, rows: u16, tick_ms: u64) -> GameConfig {
    let mut config = GameConfig::new(columns, rows);
    config.tick_ms = tick_ms;
    config
}

fn wait_until(session: &GameSession, deadline: Duration, f: impl Fn(&GameSession) -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if f(session) {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    f(session)
}

#[test]
fn test_session_runs_into_wall_and_reports_once() {
    let config = config(6, 6, 5);
    let board = config.board().unwrap();
    let mut session = GameSession::new(config, board).unwrap();

    assert!(session.start());
    assert!(wait_until(&session, Duration::from_secs(2), |s| {
        s.status() == GameStatus::GameOver
    }));
    assert!(wait_until(&session, Duration::from_secs(1), |s| {
        s.phase() == SchedulerPhase::Stopped
    }));

    let over: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::GameOver { .. }))
        .collect();
    assert_eq!(over.len(), 1);
    assert!(matches!(
        over[0],
        EngineEvent::GameOver {
            reason: GameOverReason::Wall | GameOverReason::SelfCollision,
            ..
        }
    ));
}

#[test]
fn test_session_pause_holds_the_board() {
    let config = config(20, 20, 10);
    let board = config.board().unwrap();
    let mut session = GameSession::new(config, board).unwrap();
    session.start();
    thread::sleep(Duration::from_millis(25));

    assert!(session.pause());
    let frozen = session.snapshot();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(session.snapshot(), frozen);
    assert_eq!(session.status(), GameStatus::Paused);

    assert!(session.resume());
    assert!(wait_until(&session, Duration::from_secs(1), |s| {
        s.snapshot().steps > frozen.steps
    }));
    session.stop();
}

#[test]
fn test_tilt_drives_direction() {
    let config = config(20, 20, 1_000);
    let board = config.board().unwrap();
    let mut session = GameSession::new(config, board)
        .unwrap()
        .with_tilt(TiltMapper::new(2.5));

    // Not started: readings are dropped.
    assert_eq!(session.on_tilt(6.0, 0.0), None);

    session.start();
    assert_eq!(session.on_tilt(0.5, -0.3), None);
    assert_eq!(session.on_tilt(6.0, 1.0), Some(Direction::Down));
    session.engine().step();
    assert_eq!(session.snapshot().direction, Direction::Down);
    session.stop();
}

#[test]
fn test_restart_gives_a_fresh_game() {
    let config = config(20, 20, 200);
    let board = config.board().unwrap();
    let mut session = GameSession::new(config, board).unwrap();
    session.start();
    session.turn(Direction::Up);
    session.engine().step();
    assert_eq!(session.snapshot().steps, 1);

    session.restart().unwrap();
    assert!(session.is_started());
    assert_eq!(session.phase(), SchedulerPhase::Running);
    let snap = session.snapshot();
    assert_eq!(snap.steps, 0);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.direction, Direction::Right);
    assert_eq!(snap.status, GameStatus::Running);
    session.stop();
}

#[test]
fn test_stop_is_final() {
    let config = config(20, 20, 5);
    let board = config.board().unwrap();
    let mut session = GameSession::new(config, board).unwrap();
    session.start();
    session.stop();

    let steps = session.snapshot().steps;
    thread::sleep(Duration::from_millis(30));
    assert_eq!(session.snapshot().steps, steps);
    assert!(!session.start());
    assert!(session.engine().is_halted());
}
