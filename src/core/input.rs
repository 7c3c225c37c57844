//! Pressed-key table polled by states once per frame.

use crossterm::event::KeyCode;
use std::collections::HashSet;

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up or W
    Up,
    /// Arrow down or S
    Down,
    /// Arrow left or A
    Left,
    /// Arrow right or D
    Right,
    /// Advance text / confirm
    Enter,
    /// Open or close the stats view
    Escape,
    /// Heal the party (P)
    Heal,
}

impl Key {
    /// Maps a terminal key code. Unmapped keys return None.
    pub fn from_key_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Heal),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Input {
    pressed: HashSet<Key>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Reads and consumes a press so nothing else acts on it this frame.
    pub fn take(&mut self, key: Key) -> bool {
        self.pressed.remove(&key)
    }

    /// First pressed direction, in Up/Down/Left/Right order.
    pub fn direction(&self) -> Option<Key> {
        [Key::Up, Key::Down, Key::Left, Key::Right]
            .into_iter()
            .find(|key| self.is_pressed(*key))
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
