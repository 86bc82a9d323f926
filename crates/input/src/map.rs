//! Key mapping from terminal events to game actions.

use blockfall_core::types::{Action, Direction, Rotation};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Direction::Left.into()),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Direction::Right.into()),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Direction::Down.into()),
        KeyCode::Char(' ') => Some(Direction::Drop.into()),

        // Rotation
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('k') | KeyCode::Char('w') => {
            Some(Rotation::Clockwise.into())
        }
        KeyCode::Char('z') | KeyCode::Char('y') => Some(Rotation::Anticlockwise.into()),

        _ => None,
    }
}

/// Check if key should end the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
