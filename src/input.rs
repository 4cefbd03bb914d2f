//! Key event mapping for terminal play.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to a game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(GameAction::CursorDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(GameAction::CursorRight),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Flip),
        KeyCode::Char('n') => Some(GameAction::NewGame),
        _ => None,
    }
}

/// Quit keys: q, Esc, Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
