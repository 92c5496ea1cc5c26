//! Key bindings: arrow keys plus vim and WASD letters.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the player wants the falling piece to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Rotate,
}

/// Result of decoding one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Intent),
    Quit,
    None,
}

/// Map a key event to a command.
///
/// Up and Down both rotate clockwise. There is no soft drop.
pub fn key_to_command(key: KeyEvent) -> Command {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Command::Quit,
            _ => Command::None,
        };
    }
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Command::Play(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Command::Play(Intent::MoveRight),
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Char('k')
        | KeyCode::Char('j')
        | KeyCode::Char('w')
        | KeyCode::Char('s') => Command::Play(Intent::Rotate),
        _ => Command::None,
    }
}
