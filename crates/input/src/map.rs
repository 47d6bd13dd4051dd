//! Key mapping from terminal events to device buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to one of the three buttons.
pub fn map_key(key: KeyEvent) -> Option<Button> {
    match key.code {
        KeyCode::Right
        | KeyCode::Tab
        | KeyCode::Char(' ')
        | KeyCode::Char('n')
        | KeyCode::Char('N') => Some(Button::Navigate),

        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Button::Select),

        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('B') => {
            Some(Button::Back)
        }

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_navigate_keys() {
        for code in [KeyCode::Right, KeyCode::Tab, KeyCode::Char(' '), KeyCode::Char('N')] {
            assert_eq!(map_key(KeyEvent::from(code)), Some(Button::Navigate));
        }
    }

    #[test]
    fn test_select_and_back_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Button::Select));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), Some(Button::Select));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(Button::Back));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('B'))), Some(Button::Back));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
