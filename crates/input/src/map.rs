//! Key mapping from terminal events to commands.

use crate::types::{Command, MoveDirection, RotationDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the engine
    Command(Command),
    /// Start a new session
    NewGame,
    Quit,
}

/// Map keyboard input to a host action.
///
/// Key releases are ignored so terminals that report them do not double
/// every move.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyAction::Quit);
    }

    let command = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Command::Move(MoveDirection::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Move(MoveDirection::Right)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Command::Move(MoveDirection::Down)
        }

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Command::Rotate(RotationDirection::Clockwise)
        }
        KeyCode::Char('j') | KeyCode::Char('J') => {
            Command::Rotate(RotationDirection::CounterClockwise)
        }

        // Actions
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,

        KeyCode::Char('n') | KeyCode::Char('N') => return Some(KeyAction::NewGame),

        _ => return None,
    };
    Some(KeyAction::Command(command))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
