//! Terminal Snake runner (default binary).
//!
//! The game advances on the session's own tick thread; this loop only polls keys,
//! drains engine events and redraws the latest snapshot through the
//! framebuffer-based renderer.

use std::fs::{self, File};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tilt_snake::core::GameConfig;
use tilt_snake::engine::EngineEvent;
use tilt_snake::input::{handle_key_event, should_quit, HostCommand};
use tilt_snake::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tilt_snake::GameSession;

/// Redraw cadence, independent of the game tick.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to the file named by `SNAKE_LOG_PATH`; a raw-mode terminal has no room for
/// log lines.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("SNAKE_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config() -> Result<GameConfig> {
    let base = match std::env::var("SNAKE_CONFIG") {
        Ok(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
            GameConfig::from_json_str(&text).with_context(|| format!("parse {path}"))?
        }
        Err(_) => GameConfig::default(),
    };
    Ok(base.with_env())
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let view = BoardView::default();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let viewport = Viewport::new(w, h);
    let (units_w, units_h) = view.layout_units(viewport);
    let board = config.board_for_layout(units_w, units_h)?;

    let mut session = GameSession::new(config, board)?;
    session.start();

    let mut viewport = viewport;
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    loop {
        for event in session.drain_events() {
            match event {
                EngineEvent::ScoreChanged { score } => debug!(score, "score"),
                EngineEvent::GameOver { reason, score } => {
                    info!(reason = reason.as_str(), score, "game finished")
                }
            }
        }

        // Render.
        view.render_into(&session.snapshot(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(FRAME)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    session.stop();
                    return Ok(());
                }

                match handle_key_event(key) {
                    Some(HostCommand::Turn(direction)) => {
                        session.turn(direction);
                    }
                    Some(HostCommand::TogglePause) => {
                        session.toggle_pause();
                    }
                    Some(HostCommand::Restart) => session.restart()?,
                    None => {}
                }
            }
            Event::Resize(w, h) => {
                viewport = Viewport::new(w, h);
                term.invalidate();
            }
            _ => {}
        }
    }
}
