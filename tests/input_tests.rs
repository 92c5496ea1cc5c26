//! Key decoding into game intents

use blockfall::input::{key_to_command, Command, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn press(code: KeyCode) -> Command {
    key_to_command(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn arrows_move_sideways() {
    assert_eq!(press(KeyCode::Left), Command::Play(Intent::MoveLeft));
    assert_eq!(press(KeyCode::Right), Command::Play(Intent::MoveRight));
}

#[test]
fn up_and_down_both_rotate() {
    assert_eq!(press(KeyCode::Up), Command::Play(Intent::Rotate));
    assert_eq!(press(KeyCode::Down), Command::Play(Intent::Rotate));
}

#[test]
fn letter_bindings_match_arrows() {
    assert_eq!(press(KeyCode::Char('h')), press(KeyCode::Left));
    assert_eq!(press(KeyCode::Char('a')), press(KeyCode::Left));
    assert_eq!(press(KeyCode::Char('l')), press(KeyCode::Right));
    assert_eq!(press(KeyCode::Char('d')), press(KeyCode::Right));
    for c in ['k', 'j', 'w', 's'] {
        assert_eq!(press(KeyCode::Char(c)), Command::Play(Intent::Rotate), "{c}");
    }
}

#[test]
fn quit_keys() {
    assert_eq!(press(KeyCode::Esc), Command::Quit);
    assert_eq!(press(KeyCode::Char('q')), Command::Quit);
    assert_eq!(
        key_to_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Command::Quit
    );
}

#[test]
fn unknown_keys_are_ignored() {
    assert_eq!(press(KeyCode::Char('x')), Command::None);
    assert_eq!(press(KeyCode::Enter), Command::None);
    assert_eq!(press(KeyCode::Char(' ')), Command::None);
    assert_eq!(
        key_to_command(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)),
        Command::None
    );
}
