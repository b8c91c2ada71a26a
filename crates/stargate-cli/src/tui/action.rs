//! TUI action types.
//!
//! Actions represent user intents that can be triggered by key events
//! and are processed by the application to update state.

/// Actions that can be triggered by user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Toggle log panel
    ToggleLog,
    /// Focus next element
    FocusNext,
    /// Focus previous element
    FocusPrev,

    /// Ask the portal for a file dialog
    OpenFileDialog,
    /// Paths dropped (or pasted) onto the terminal
    DropFiles(Vec<String>),
    /// Submit the selected file to the typed target
    Send,

    /// Insert a character into the target field
    TargetInsert(char),
    /// Insert pasted text into the target field
    TargetPaste(String),
    /// Delete before the cursor
    TargetBackspace,
    /// Delete under the cursor
    TargetDelete,
    /// Cursor left
    TargetLeft,
    /// Cursor right
    TargetRight,
    /// Cursor to start
    TargetHome,
    /// Cursor to end
    TargetEnd,
    /// Clear the target field
    TargetClear,

    /// Move up in file browser
    FileBrowserUp,
    /// Move down in file browser
    FileBrowserDown,
    /// Jump to first entry
    FileBrowserFirst,
    /// Jump to last entry
    FileBrowserLast,
    /// Go to parent directory
    FileBrowserBack,
    /// Enter directory or pick file
    FileBrowserEnter,
    /// Toggle hidden files
    FileBrowserToggleHidden,
    /// Dismiss the file browser without picking
    CloseFileBrowser,

    /// No action
    None,
}
