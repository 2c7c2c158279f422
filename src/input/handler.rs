use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

use crate::game::Command;

/// What a key press means on the emulated device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Button A, button B or the touch logo
    Device(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Button A
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Device(Command::TurnLeft)
            }
            // Button B
            KeyCode::Right | KeyCode::Char('b') | KeyCode::Char('B') => {
                KeyAction::Device(Command::TurnRight)
            }
            // Logo
            KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Char('L') => {
                KeyAction::Device(Command::Reset)
            }

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            other => {
                trace!("Ignoring key {:?}", other);
                KeyAction::None
            }
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
