//! Key mapping

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Processed input action.
///
/// Plain characters (including space) arrive as [`Action::Char`]; whether a
/// space edits the assistant input or toggles a task depends on focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Regular character input
    Char(char),
    /// Enter
    Submit,
    Backspace,
    Delete,
    Left,
    Right,
    /// Move selection or scroll up
    Up,
    /// Move selection or scroll down
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Cycle focus forward
    Tab,
    /// Cycle focus backward
    BackTab,
    Escape,
    /// Ctrl+A, show or hide the assistant panel
    ToggleAssistant,
    /// Ctrl+U
    ClearLine,
    /// Ctrl+W
    DeleteWord,
    /// Bracketed paste
    Paste(String),
    /// Ctrl+C or Ctrl+Q
    Quit,
    /// Unknown/unhandled
    Unknown,
}

/// Convert a crossterm key event to an action
pub fn key_to_action(event: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('a') => Action::ToggleAssistant,
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('u') => Action::ClearLine,
            KeyCode::Char('w') => Action::DeleteWord,
            _ => Action::Unknown,
        };
    }

    if modifiers.contains(KeyModifiers::ALT) {
        return Action::Unknown;
    }

    match code {
        KeyCode::Char(c) => Action::Char(c),
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Action::BackTab,
        KeyCode::Tab => Action::Tab,
        KeyCode::BackTab => Action::BackTab,
        KeyCode::Esc => Action::Escape,
        _ => Action::Unknown,
    }
}

/// Convert a crossterm event to an action.
///
/// Key releases are ignored so Windows terminals don't double every keystroke.
pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            Some(key_to_action(key_event))
        }
        Event::Paste(text) => Some(Action::Paste(text)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            Action::ToggleAssistant
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_space_is_a_char() {
        assert_eq!(
            key_to_action(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Action::Char(' ')
        );
    }

    #[test]
    fn test_shift_tab() {
        assert_eq!(
            key_to_action(key(KeyCode::Tab, KeyModifiers::SHIFT)),
            Action::BackTab
        );
        assert_eq!(key_to_action(key(KeyCode::Tab, KeyModifiers::NONE)), Action::Tab);
    }

    #[test]
    fn test_release_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(event_to_action(Event::Key(release)), None);
        assert_eq!(
            event_to_action(Event::Paste("hi".into())),
            Some(Action::Paste("hi".into()))
        );
    }
}
