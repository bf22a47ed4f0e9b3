/*
[INPUT]:  Crossterm key events
[OUTPUT]: Quit-key classification for the dashboard
[POS]:    TUI key handling
[UPDATE]: When adding dashboard hotkeys
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// `q`, `Q`, `Esc` or `Ctrl-C`. Raw mode delivers Ctrl-C as a key event.
pub(super) fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
