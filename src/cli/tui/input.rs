//! Input handling for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::Action;

/// Keys while the reservation form is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Char(char),
    Backspace,
    NextField,
    Submit,
    Cancel,
}

/// Convert a crossterm key event to an Action (normal browsing mode).
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Reserve),
        KeyCode::Char('o') => Some(Action::Occupy),
        KeyCode::Char('f') => Some(Action::Free),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('g') => Some(Action::GridView),
        KeyCode::Char('t') => Some(Action::TableView),
        KeyCode::F(5) => Some(Action::Refresh),
        _ => None,
    }
}

pub fn handle_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key_event(key),
        _ => None,
    }
}

/// Convert a key event to a form key while the overlay is open.
pub fn handle_form_key(key: KeyEvent) -> Option<FormKey> {
    match key.code {
        KeyCode::Esc => Some(FormKey::Cancel),
        KeyCode::Enter => Some(FormKey::Submit),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => Some(FormKey::NextField),
        KeyCode::Backspace => Some(FormKey::Backspace),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(FormKey::Cancel)
        }
        KeyCode::Char(c) => Some(FormKey::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn browse_keys_map_to_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(Action::Reserve)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('t'))),
            Some(Action::TableView)
        );
    }

    #[test]
    fn form_keys_capture_text() {
        assert_eq!(
            handle_form_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(FormKey::Char('q'))
        );
        assert_eq!(
            handle_form_key(KeyEvent::from(KeyCode::Esc)),
            Some(FormKey::Cancel)
        );
    }
}
