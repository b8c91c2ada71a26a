//! TUI event handling.
//!
//! This module handles terminal events (key presses, pastes, resize)
//! and converts them into actions.

use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use stargate_core::portal::parse_dropped_paths;

use super::action::Action;
use super::state::{AppState, Focus};

/// Event handler that polls for terminal events.
pub struct EventHandler {
    /// Receiver for events
    rx: mpsc::UnboundedReceiver<Event>,
    /// Cancellation token for the background polling task
    cancel_token: CancellationToken,
}

impl EventHandler {
    /// Create a new event handler.
    ///
    /// This spawns a background task that polls for terminal events.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        tokio::task::spawn_blocking(move || loop {
            if token.is_cancelled() {
                break;
            }
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(event) = event::read() {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, cancel_token }
    }

    /// Cancel the event polling task.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Get the next event, if available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Map a key event to an action based on current state.
pub fn map_key_event(key: KeyEvent, state: &AppState) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }

    // ctrl+c always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if state.help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::F(1) => Action::ToggleHelp,
            _ => Action::None,
        };
    }

    if state.file_browser.is_some() {
        return handle_file_browser_keys(key);
    }

    if let Some(action) = handle_global_keys(key, state) {
        return action;
    }

    match state.focus {
        Focus::Portal => handle_portal_keys(key),
        Focus::Target => handle_target_keys(key),
    }
}

/// Map pasted text to an action.
///
/// Terminals deliver a file dragged onto them as pasted text. Paste is a
/// drop when its first path names an existing file. Anything else is typed
/// into the target field, whichever panel has focus.
pub fn map_paste(text: &str, state: &AppState) -> Action {
    if state.help_visible {
        return Action::None;
    }

    let paths = parse_dropped_paths(text);
    let Some(first) = paths.first() else {
        return Action::None;
    };

    if Path::new(first).exists() {
        Action::DropFiles(paths)
    } else if state.file_browser.is_some() {
        Action::None
    } else {
        Action::TargetPaste(text.to_string())
    }
}

/// Handle keybindings that work regardless of focus.
fn handle_global_keys(key: KeyEvent, state: &AppState) -> Option<Action> {
    let in_input_mode = state.in_input_mode();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => Some(Action::Send),
        KeyCode::Char('o') if ctrl => Some(Action::OpenFileDialog),

        KeyCode::Char('q' | 'Q') if !in_input_mode => Some(Action::Quit),
        KeyCode::Char('?') if !in_input_mode => Some(Action::ToggleHelp),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::Char('L') if !in_input_mode => Some(Action::ToggleLog),

        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),

        _ => None,
    }
}

/// Handle keys while the drop zone has focus.
fn handle_portal_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter | KeyCode::Char('o' | 'O' | ' ') => Action::OpenFileDialog,
        KeyCode::Char('s' | 'S') => Action::Send,
        KeyCode::Char('t' | 'T' | 'i') => Action::FocusNext,
        _ => Action::None,
    }
}

/// Handle keys while the target field has focus.
fn handle_target_keys(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => Action::Send,
        KeyCode::Esc => Action::FocusNext,
        KeyCode::Char('u') if ctrl => Action::TargetClear,
        KeyCode::Char('a') if ctrl => Action::TargetHome,
        KeyCode::Char('e') if ctrl => Action::TargetEnd,
        KeyCode::Char(c) if !ctrl => Action::TargetInsert(c),
        KeyCode::Backspace => Action::TargetBackspace,
        KeyCode::Delete => Action::TargetDelete,
        KeyCode::Left => Action::TargetLeft,
        KeyCode::Right => Action::TargetRight,
        KeyCode::Home => Action::TargetHome,
        KeyCode::End => Action::TargetEnd,
        _ => Action::None,
    }
}

/// Handle keys while the file browser is open.
fn handle_file_browser_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::FileBrowserUp,
        KeyCode::Down | KeyCode::Char('j') => Action::FileBrowserDown,
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => Action::FileBrowserBack,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => Action::FileBrowserEnter,
        KeyCode::Char('.') => Action::FileBrowserToggleHidden,
        KeyCode::Esc | KeyCode::Char('q') => Action::CloseFileBrowser,
        KeyCode::Home | KeyCode::Char('g') => Action::FileBrowserFirst,
        KeyCode::End | KeyCode::Char('G') => Action::FileBrowserLast,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::FileBrowserState;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn with_browser() -> AppState {
        AppState {
            file_browser: Some(FileBrowserState {
                current_dir: PathBuf::from("/"),
                entries: Vec::new(),
                selected: 0,
                show_hidden: false,
            }),
            ..AppState::default()
        }
    }

    #[test]
    fn test_portal_keys() {
        let state = AppState::default();
        assert_eq!(map_key_event(key(KeyCode::Enter), &state), Action::OpenFileDialog);
        assert_eq!(map_key_event(key(KeyCode::Char('o')), &state), Action::OpenFileDialog);
        assert_eq!(map_key_event(key(KeyCode::Char('s')), &state), Action::Send);
        assert_eq!(map_key_event(key(KeyCode::Char('q')), &state), Action::Quit);
        assert_eq!(map_key_event(key(KeyCode::Tab), &state), Action::FocusNext);
    }

    #[test]
    fn test_target_keys_type_text() {
        let state = AppState {
            focus: Focus::Target,
            ..AppState::default()
        };
        assert_eq!(
            map_key_event(key(KeyCode::Char('q')), &state),
            Action::TargetInsert('q')
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('s')), &state),
            Action::TargetInsert('s')
        );
        assert_eq!(map_key_event(key(KeyCode::Enter), &state), Action::Send);
        assert_eq!(map_key_event(ctrl('u'), &state), Action::TargetClear);
        assert_eq!(map_key_event(key(KeyCode::Esc), &state), Action::FocusNext);
    }

    #[test]
    fn test_ctrl_shortcuts_work_everywhere() {
        let target = AppState {
            focus: Focus::Target,
            ..AppState::default()
        };
        assert_eq!(map_key_event(ctrl('c'), &target), Action::Quit);
        assert_eq!(map_key_event(ctrl('s'), &target), Action::Send);
        assert_eq!(map_key_event(ctrl('o'), &target), Action::OpenFileDialog);
        assert_eq!(map_key_event(ctrl('c'), &with_browser()), Action::Quit);
    }

    #[test]
    fn test_file_browser_captures_keys() {
        let state = with_browser();
        assert_eq!(map_key_event(key(KeyCode::Char('j')), &state), Action::FileBrowserDown);
        assert_eq!(map_key_event(key(KeyCode::Enter), &state), Action::FileBrowserEnter);
        assert_eq!(map_key_event(key(KeyCode::Esc), &state), Action::CloseFileBrowser);
        assert_eq!(map_key_event(key(KeyCode::Char('s')), &state), Action::None);
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let state = AppState {
            help_visible: true,
            ..AppState::default()
        };
        assert_eq!(map_key_event(key(KeyCode::Esc), &state), Action::ToggleHelp);
        assert_eq!(map_key_event(key(KeyCode::Char('s')), &state), Action::None);
    }

    #[test]
    fn test_paste_on_portal_is_a_drop() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("my report.pdf");
        let other = dir.path().join("b");
        std::fs::write(&report, b"x").unwrap();
        std::fs::write(&other, b"y").unwrap();

        let state = AppState::default();
        let pasted = format!("'{}' {}", report.display(), other.display());
        assert_eq!(
            map_paste(&pasted, &state),
            Action::DropFiles(vec![
                report.display().to_string(),
                other.display().to_string()
            ])
        );
        assert_eq!(map_paste("  \n", &state), Action::None);
    }

    #[test]
    fn test_paste_of_missing_path_goes_to_target() {
        let state = AppState::default();
        assert_eq!(
            map_paste("192.168.1.42", &state),
            Action::TargetPaste("192.168.1.42".to_string())
        );
        assert_eq!(
            map_paste("/no/such/file.txt", &with_browser()),
            Action::None
        );
    }

    #[test]
    fn test_paste_in_target_field() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.jpg");
        std::fs::write(&file, b"x").unwrap();

        let state = AppState {
            focus: Focus::Target,
            ..AppState::default()
        };

        assert_eq!(
            map_paste("192.168.1.42", &state),
            Action::TargetPaste("192.168.1.42".to_string())
        );

        let dropped = file.display().to_string();
        assert_eq!(
            map_paste(&dropped, &state),
            Action::DropFiles(vec![dropped.clone()])
        );
    }
}
