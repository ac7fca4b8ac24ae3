//! Key mapping from terminal events to host commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the terminal host should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Forward a direction intent to the engine.
    Turn(Direction),
    /// Toggle pause/resume, standing in for the host losing the foreground.
    TogglePause,
    /// Throw the session away and start a fresh one.
    Restart,
}

/// Map keyboard input to host commands.
pub fn handle_key_event(key: KeyEvent) -> Option<HostCommand> {
    match key.code {
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(HostCommand::Turn(Direction::Up)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(HostCommand::Turn(Direction::Down)),
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(HostCommand::Turn(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(HostCommand::Turn(Direction::Right)),

        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(HostCommand::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn turn(code: KeyCode) -> Option<Direction> {
        match handle_key_event(KeyEvent::from(code)) {
            Some(HostCommand::Turn(d)) => Some(d),
            _ => None,
        }
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(turn(KeyCode::Up), Some(Direction::Up));
        assert_eq!(turn(KeyCode::Down), Some(Direction::Down));
        assert_eq!(turn(KeyCode::Left), Some(Direction::Left));
        assert_eq!(turn(KeyCode::Right), Some(Direction::Right));
    }

    #[test]
    fn test_letter_keys() {
        assert_eq!(turn(KeyCode::Char('W')), Some(Direction::Up));
        assert_eq!(turn(KeyCode::Char('j')), Some(Direction::Down));
        assert_eq!(turn(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(turn(KeyCode::Char('L')), Some(Direction::Right));
        assert_eq!(turn(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_lifecycle_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(HostCommand::TogglePause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(HostCommand::TogglePause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(HostCommand::Restart)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
