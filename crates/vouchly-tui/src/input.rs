//! Key → text-input plumbing shared by the form and the count prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

/// Feed an editing key into `input`. Returns whether the key was consumed.
pub fn handle_input_key(input: &mut Input, key: KeyEvent) -> bool {
    let request = match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputRequest::InsertChar(c)
        }
        KeyCode::Char('u') => InputRequest::DeleteLine,
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return false,
    };
    input.handle(request);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_and_backspace_edit_the_value() {
        let mut input = Input::new("10".into());
        assert!(handle_input_key(&mut input, key(KeyCode::Char('0'))));
        assert_eq!(input.value(), "100");
        assert!(handle_input_key(&mut input, key(KeyCode::Backspace)));
        assert_eq!(input.value(), "10");
        assert!(!handle_input_key(&mut input, key(KeyCode::Enter)));
    }

    #[test]
    fn ctrl_u_clears_the_line() {
        let mut input = Input::new("DISCOUNT".into());
        handle_input_key(&mut input, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }
}
