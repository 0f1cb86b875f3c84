use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

/// Console-level actions. Keys that map to nothing here go to the prompt's
/// line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    Submit,
    HistoryBack,
    HistoryForward,
    InsertExample,
    Navigate(Command),
    ScrollUp,
    ScrollDown,
    Quit,
}

pub fn map_key_to_action(key: KeyEvent) -> Option<ConsoleAction> {
    map_key_to_action_with_preset(key, KeymapPreset::Default)
}

pub fn map_key_to_action_with_preset(
    key: KeyEvent,
    preset: KeymapPreset,
) -> Option<ConsoleAction> {
    match preset {
        KeymapPreset::Default => map_key_default(key),
        KeymapPreset::Emacs => map_key_emacs(key),
    }
}

fn map_key_default(key: KeyEvent) -> Option<ConsoleAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(ConsoleAction::Quit),
            KeyCode::Char('n') => Some(ConsoleAction::Navigate(Command::Next)),
            KeyCode::Char('p') => Some(ConsoleAction::Navigate(Command::Previous)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(ConsoleAction::Submit),
        KeyCode::Up => Some(ConsoleAction::HistoryBack),
        KeyCode::Down => Some(ConsoleAction::HistoryForward),
        KeyCode::Tab => Some(ConsoleAction::InsertExample),
        KeyCode::PageUp => Some(ConsoleAction::ScrollUp),
        KeyCode::PageDown => Some(ConsoleAction::ScrollDown),
        KeyCode::Esc => Some(ConsoleAction::Quit),
        _ => None,
    }
}

fn map_key_emacs(key: KeyEvent) -> Option<ConsoleAction> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('n') => Some(ConsoleAction::Navigate(Command::Next)),
            KeyCode::Char('p') => Some(ConsoleAction::Navigate(Command::Previous)),
            KeyCode::Char('v') => Some(ConsoleAction::ScrollUp),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('p') => Some(ConsoleAction::HistoryBack),
            KeyCode::Char('n') => Some(ConsoleAction::HistoryForward),
            KeyCode::Char('v') => Some(ConsoleAction::ScrollDown),
            KeyCode::Char('j') => Some(ConsoleAction::Submit),
            _ => map_key_default(key),
        };
    }

    map_key_default(key)
}
