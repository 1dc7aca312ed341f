//! Keybinding definitions for the TUI.
//!
//! Key routing depends on which text input, if any, currently has focus:
//! printable characters go to the focused input, everything else is a
//! command.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which text input owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    None,
    QueryField,
    ClassifyInput,
}

impl InputFocus {
    pub fn is_text_input(&self) -> bool {
        !matches!(self, InputFocus::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    /// Move focus to the search query field.
    FocusSearch,
    /// Move focus to the classification input.
    FocusInput,
    /// Run the search in the query field from page 1.
    Submit,
    Blur,
    InsertChar(char),
    DeleteChar,
    ClearInput,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageSize,
    ClearSession,
    ToggleModel,
    MoveUp,
    MoveDown,
    OpenHelp,
    Confirm,
    Cancel,
}

pub fn map_key(event: KeyEvent, focus: InputFocus) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('k') => Some(Action::FocusSearch),
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') if focus.is_text_input() => Some(Action::ClearInput),
            _ => None,
        };
    }

    if focus.is_text_input() {
        return match code {
            KeyCode::Enter if focus == InputFocus::QueryField => Some(Action::Submit),
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Blur),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Tab => Some(Action::NextView),
            KeyCode::BackTab => Some(Action::PrevView),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::ALT) => {
                Some(Action::InsertChar(c))
            }
            _ => None,
        };
    }

    match code {
        KeyCode::Char('/') => Some(Action::FocusSearch),
        KeyCode::Char('i') => Some(Action::FocusInput),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('s') => Some(Action::CyclePageSize),
        KeyCode::Char('c') => Some(Action::ClearSession),
        KeyCode::Char('m') => Some(Action::ToggleModel),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevPage),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPage),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = match c {
                '1' => 0,
                '2' => 1,
                '3' => 2,
                _ => return None,
            };
            Some(Action::SwitchView(idx))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_slash_focuses_search_when_idle() {
        assert_eq!(
            map_key(key(KeyCode::Char('/')), InputFocus::None),
            Some(Action::FocusSearch)
        );
    }

    #[test]
    fn test_slash_is_literal_inside_inputs() {
        for focus in [InputFocus::QueryField, InputFocus::ClassifyInput] {
            assert_eq!(
                map_key(key(KeyCode::Char('/')), focus),
                Some(Action::InsertChar('/'))
            );
        }
    }

    #[test]
    fn test_ctrl_k_focuses_search_everywhere() {
        let event = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        for focus in [InputFocus::None, InputFocus::QueryField, InputFocus::ClassifyInput] {
            assert_eq!(map_key(event, focus), Some(Action::FocusSearch));
        }
    }

    #[test]
    fn test_enter_submits_only_from_query_field() {
        assert_eq!(
            map_key(key(KeyCode::Enter), InputFocus::QueryField),
            Some(Action::Submit)
        );
        assert_eq!(
            map_key(key(KeyCode::Enter), InputFocus::ClassifyInput),
            Some(Action::Confirm)
        );
        assert_eq!(map_key(key(KeyCode::Enter), InputFocus::None), Some(Action::Confirm));
    }

    #[test]
    fn test_command_letters_are_typed_while_focused() {
        assert_eq!(
            map_key(key(KeyCode::Char('q')), InputFocus::QueryField),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(map_key(key(KeyCode::Char('q')), InputFocus::None), Some(Action::Quit));
    }
}
