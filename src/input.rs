//! Key bindings: arrows and vim-style hjkl.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Discrete player input consumed by [`crate::game::GameState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Quit,
    Left,
    Right,
    /// Soft drop.
    Down,
    /// Rotate.
    Up,
}

/// Map a key event to an input. Only presses count; repeats and releases are dropped.
pub fn key_to_input(key: KeyEvent) -> Option<Input> {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key;
    if kind != KeyEventKind::Press {
        return None;
    }
    if modifiers == KeyModifiers::CONTROL {
        return matches!(code, KeyCode::Char('c')).then_some(Input::Quit);
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Right),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Down),
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Up),
        _ => None,
    }
}

/// Terminal events other than key presses carry no input.
pub fn event_to_input(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => key_to_input(*key),
        _ => None,
    }
}
