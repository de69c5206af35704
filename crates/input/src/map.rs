//! Key mapping from terminal events to command bytes.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to an engine command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // Steering
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Turn(Direction::Up)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Turn(Direction::Left))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Turn(Direction::Down))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Turn(Direction::Right))
        }

        // Start from the menu
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => Some(Command::Start),

        _ => None,
    }
}

/// Map keyboard input to the byte the engine's input port expects.
pub fn key_to_byte(key: KeyEvent) -> Option<u8> {
    handle_key_event(key).map(|command| command.as_byte())
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
