//! Keybinding definitions for browse mode.
//!
//! Keys pressed while the submission form is open are routed to the form
//! instead (see `views::form` and the main loop) and never reach `map_key`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use til_core::VoteKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    MoveUp,
    MoveDown,
    NextCategory,
    PrevCategory,
    /// Jump straight to a sidebar entry: 0 is "all", 1-8 the categories.
    JumpCategory(usize),
    OpenForm,
    Vote(VoteKind),
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('n') => Some(Action::OpenForm),
        KeyCode::Char('i') => Some(Action::Vote(VoteKind::Interesting)),
        KeyCode::Char('w') => Some(Action::Vote(VoteKind::Mindblowing)),
        KeyCode::Char('f') => Some(Action::Vote(VoteKind::False)),
        KeyCode::Tab => Some(Action::NextCategory),
        KeyCode::BackTab => Some(Action::PrevCategory),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = (c as u8 - b'0') as usize;
            if idx <= 8 {
                Some(Action::JumpCategory(idx))
            } else {
                None
            }
        }
        _ => None,
    }
}
