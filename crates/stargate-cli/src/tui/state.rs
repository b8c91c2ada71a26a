//! TUI application state types.
//!
//! The portal session itself lives in the core controller. This is only
//! what the terminal front-end needs on top: focus, the target field being
//! edited, the file browser standing in for the dialog, and the log panel.

use std::path::PathBuf;

use super::components::SpinnerState;

/// Most log entries kept for the log panel.
const MAX_LOG_ENTRIES: usize = 200;

/// Which part of the portal screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The drop zone: open the dialog, send
    #[default]
    Portal,
    /// The target address field
    Target,
}

impl Focus {
    /// Move to the next focus area.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Portal => Self::Target,
            Self::Target => Self::Portal,
        }
    }

    /// Move to the previous focus area.
    #[must_use]
    pub fn prev(self) -> Self {
        self.next()
    }
}

/// Single-line text field for the target address.
///
/// `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetInputState {
    /// Raw text as typed; trimmed only at submission
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TargetInputState {
    /// Field pre-filled with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Insert pasted text at the cursor, dropping line breaks and other
    /// control characters.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert(c);
        }
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    /// Move the cursor to the start.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// State for file browser component
#[derive(Debug)]
pub struct FileBrowserState {
    /// Current directory
    pub current_dir: PathBuf,
    /// Directory entries
    pub entries: Vec<DirEntry>,
    /// Selected index
    pub selected: usize,
    /// Show hidden files
    pub show_hidden: bool,
}

impl FileBrowserState {
    /// Entry under the cursor.
    pub fn current(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    /// Move the cursor up.
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the cursor down.
    pub fn down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Jump to the first entry.
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to the last entry.
    pub fn last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }
}

/// Directory entry for file browser
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Full path
    pub path: PathBuf,
    /// Is this a directory
    pub is_dir: bool,
    /// File size in bytes
    pub size: u64,
    /// Is this a hidden file
    pub is_hidden: bool,
}

impl DirEntry {
    /// Whether this is the `..` entry.
    pub fn is_parent_link(&self) -> bool {
        self.path.ends_with("..")
    }
}

/// Log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Local>,
    /// Log level
    pub level: LogLevel,
    /// Message
    pub message: String,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Information message
    Info,
    /// Warning message
    Warn,
    /// Error message
    Error,
}

impl LogLevel {
    /// Get the display string for this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Focused area
    pub focus: Focus,
    /// Target address field
    pub target: TargetInputState,
    /// Open file browser, while the portal waits on a dialog answer
    pub file_browser: Option<FileBrowserState>,
    /// Is log panel visible
    pub log_visible: bool,
    /// Is help overlay visible
    pub help_visible: bool,
    /// Log entries, oldest first
    pub log: Vec<LogEntry>,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// Spinner state for the processing animation
    pub spinner: SpinnerState,
}

impl AppState {
    /// Whether typed characters go to the target field.
    pub fn in_input_mode(&self) -> bool {
        self.focus == Focus::Target && self.file_browser.is_none() && !self.help_visible
    }

    /// Append a log entry, dropping the oldest past the cap.
    pub fn push_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log.push(LogEntry {
            timestamp: chrono::Local::now(),
            level,
            message: message.into(),
        });
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Portal.next(), Focus::Target);
        assert_eq!(Focus::Target.next(), Focus::Portal);
        assert_eq!(Focus::Portal.prev().next(), Focus::Portal);
    }

    #[test]
    fn test_target_input_editing() {
        let mut input = TargetInputState::default();
        for c in "192.168.1.4".chars() {
            input.insert(c);
        }
        input.insert('2');
        assert_eq!(input.value, "192.168.1.42");
        assert_eq!(input.cursor, 12);

        input.home();
        assert!(!input.backspace());
        assert!(input.delete());
        assert_eq!(input.value, "92.168.1.42");

        input.end();
        assert!(input.backspace());
        assert_eq!(input.value, "92.168.1.4");

        input.move_left();
        input.insert('x');
        assert_eq!(input.value, "92.168.1.x4");

        input.clear();
        assert!(input.value.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_target_input_multibyte() {
        let mut input = TargetInputState::with_value("hôte");
        assert_eq!(input.cursor, 4);
        input.move_left();
        input.move_left();
        assert!(input.backspace());
        assert_eq!(input.value, "hte");
        input.move_right();
        input.move_right();
        input.move_right();
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_target_paste_drops_newlines() {
        let mut input = TargetInputState::default();
        input.insert_str("peer.local\n");
        assert_eq!(input.value, "peer.local");
    }

    #[test]
    fn test_input_mode() {
        let mut state = AppState::default();
        assert!(!state.in_input_mode());
        state.focus = Focus::Target;
        assert!(state.in_input_mode());
        state.help_visible = true;
        assert!(!state.in_input_mode());
    }

    #[test]
    fn test_log_is_capped() {
        let mut state = AppState::default();
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            state.push_log(LogLevel::Info, format!("entry {i}"));
        }
        assert_eq!(state.log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.log[0].message, "entry 5");
    }

    #[test]
    fn test_browser_cursor_bounds() {
        let mut browser = FileBrowserState {
            current_dir: PathBuf::from("/"),
            entries: vec![
                DirEntry {
                    path: PathBuf::from("/a"),
                    is_dir: false,
                    size: 1,
                    is_hidden: false,
                },
                DirEntry {
                    path: PathBuf::from("/b"),
                    is_dir: false,
                    size: 1,
                    is_hidden: false,
                },
            ],
            selected: 0,
            show_hidden: false,
        };
        browser.up();
        assert_eq!(browser.selected, 0);
        browser.down();
        browser.down();
        assert_eq!(browser.selected, 1);
        browser.first();
        assert_eq!(browser.selected, 0);
        browser.last();
        assert_eq!(browser.current().unwrap().path, PathBuf::from("/b"));
    }

    #[test]
    fn test_parent_link_detection() {
        let entry = |p: &str| DirEntry {
            path: PathBuf::from(p),
            is_dir: true,
            size: 0,
            is_hidden: false,
        };
        assert!(entry("/home/u/..").is_parent_link());
        assert!(!entry("/home/u/docs").is_parent_link());
    }
}
