use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    FlipLeft,
    FlipRight,
    Bank,
    Restart,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Left | KeyCode::Char('h') => InputAction::FlipLeft,
        KeyCode::Right | KeyCode::Char('l') => InputAction::FlipRight,
        KeyCode::Char('b') => InputAction::Bank,
        KeyCode::Char('r') => InputAction::Restart,
        _ => InputAction::None,
    }
}
