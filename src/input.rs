//! Keyboard handling.
//!
//! Terminal key events are reduced to the two logical keys the game cares
//! about. Presses are latched until the next tick consumes them, so a press
//! fires exactly once no matter how long the key is held.

use crate::game::TickInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a single key event means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter.
    Confirm,
    /// Space or Up.
    Jump,
    /// Esc, q or Ctrl-C.
    Quit,
    /// Anything else, including repeats and releases.
    Ignored,
}

/// Classify a key event. Only fresh presses count.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignored;
    }

    match key.code {
        KeyCode::Enter => KeyAction::Confirm,
        KeyCode::Char(' ') | KeyCode::Up => KeyAction::Jump,
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Ignored,
    }
}

/// Collects key edges between ticks.
#[derive(Debug, Default)]
pub struct InputLatch {
    pending: TickInput,
    quit: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key) {
            KeyAction::Confirm => self.pending.confirm = true,
            KeyAction::Jump => self.pending.jump = true,
            KeyAction::Quit => self.quit = true,
            KeyAction::Ignored => {}
        }
    }

    /// Edges seen since the last call. Clears the latch.
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
