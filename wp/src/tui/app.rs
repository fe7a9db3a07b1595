//! TUI application - keyboard handling
//!
//! The App struct owns the AppState and translates key events into state
//! changes. It does not render - that's the views module - and it does not
//! run requests - that's the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, Field};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit. Printable keys always go
    /// to the focused form field; everything else is a control key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                debug!("handle_key: quit");
                self.state.should_quit = true;
                return true;
            }

            // === Request lifecycle ===
            (KeyCode::Enter, _) => {
                debug!("handle_key: submit");
                self.state.submit();
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                debug!("handle_key: retry");
                self.state.retry();
            }
            (KeyCode::Esc, _) => {
                debug!("handle_key: reset");
                self.state.reset();
            }

            // === Panels ===
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                debug!("handle_key: toggle raw viewer");
                self.state.toggle_raw();
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                debug!("handle_key: toggle error details");
                self.state.toggle_details();
            }

            // === Focus and scrolling ===
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
                self.state.focus = self.state.focus.next();
            }
            (KeyCode::PageUp, _) => self.state.scroll_up(),
            (KeyCode::PageDown, _) => self.state.scroll_down(),

            // === Text entry ===
            (KeyCode::Backspace, _) => {
                self.focused_input_mut().pop();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.focused_input_mut().push(c);
            }

            _ => {}
        }

        false
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.state.focus {
            Field::Location => &mut self.state.location_input,
            Field::Ages => &mut self.state.ages_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = App::new();
        type_text(&mut app, "94105");
        assert_eq!(app.state().location_input, "94105");

        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "4,7");
        assert_eq!(app.state().ages_input, "4,7");
        assert_eq!(app.state().location_input, "94105");
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let mut app = App::new();
        type_text(&mut app, "941055");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().location_input, "94105");
    }

    #[test]
    fn test_enter_submits_valid_form() {
        let mut app = App::new();
        type_text(&mut app, "Tahoe");
        app.handle_key(key(KeyCode::Enter));

        let pending = app.state().pending_submit.as_ref().expect("enter should submit");
        assert_eq!(pending.location, "Tahoe");
    }

    #[test]
    fn test_enter_with_invalid_ages_shows_field_error() {
        let mut app = App::new();
        type_text(&mut app, "Tahoe");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "not an age");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().pending_submit.is_none());
        assert!(app.state().field_errors.get("ages").is_some());
    }

    #[test]
    fn test_escape_resets() {
        let mut app = App::new();
        type_text(&mut app, "Tahoe");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));

        assert!(app.state().location_input.is_empty());
        assert!(app.state().pending_submit.is_none());
        assert!(matches!(app.state().phase, Phase::Idle));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new();
        assert!(app.handle_key(ctrl('c')));
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_ctrl_r_retries_after_error() {
        let mut app = App::new();
        type_text(&mut app, "Tahoe");
        app.handle_key(key(KeyCode::Enter));
        let input = app.state_mut().pending_submit.take().expect("queued");
        app.state_mut().begin_loading();
        app.state_mut().finish(Err(planclient::ClientError::Timeout));

        app.handle_key(ctrl('r'));
        assert_eq!(app.state().pending_submit.as_ref(), Some(&input));
    }

    #[test]
    fn test_plain_r_is_text_not_retry() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state().location_input, "r");
        assert!(app.state().pending_submit.is_none());
    }
}
