//! Keyboard input
//!
//! Movement is edge-triggered: only fresh presses move a car one lane.
//! Auto-repeat and release events are dropped here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Platform-neutral key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    /// Printable character, lower-cased
    Char(char),
}

/// A player's lane-change bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left: Key,
    pub right: Key,
}

impl Controls {
    pub const ARROWS: Controls = Controls {
        left: Key::Left,
        right: Key::Right,
    };

    pub const AD: Controls = Controls {
        left: Key::Char('a'),
        right: Key::Char('d'),
    };

    /// Bindings for a player slot (1-based)
    pub fn for_player(player: u8) -> Self {
        if player == 2 { Self::AD } else { Self::ARROWS }
    }
}

/// Translate a terminal key event; `None` for repeats, releases and unmapped keys
pub fn map_key_event(event: &KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match event.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Escape,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(key)
}
