use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands the playground understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Cancel the action waiting for its debounce window
    KillPending,
    ClearLog,
    /// Forget the current tap series
    ResetSeries,
}

/// Maps keyboard events to playground commands
pub fn map_key_event(key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('k') => Some(Command::KillPending),
        KeyCode::Char('c') => Some(Command::ClearLog),
        KeyCode::Char('r') => Some(Command::ResetSeries),
        _ => None,
    }
}
