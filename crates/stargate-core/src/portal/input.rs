//! File selection inputs: dialog pick, drag-and-drop, host events.
//!
//! All three feed the same session through guarded methods, so a shell can
//! forward whatever it receives without checking state first.

use std::sync::Arc;

use super::controller::{Completion, Phase, SessionController};
use super::request::SelectedFile;
use crate::error::Result;

/// Drag-and-drop notifications delivered by the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Files were released over the window
    FileDrop(Vec<String>),
    /// Files are being dragged over the window
    FileDropHover,
    /// The drag left the window without dropping
    FileDropCancelled,
}

impl SessionController {
    /// Open the file dialog.
    ///
    /// Only honoured from idle. Returns whether a dialog was requested.
    pub fn request_file_pick(&mut self) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            tracing::debug!("File pick ignored in {}", self.state());
            return false;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::Picking { ticket };

        let dialog = Arc::clone(&self.dialog);
        self.spawn_guarded(
            async move { dialog.open_file_dialog().await },
            move |result| Completion::Picked { ticket, result },
        );
        true
    }

    pub(super) fn finish_pick(&mut self, ticket: u64, result: Result<String>) {
        if !matches!(self.phase, Phase::Picking { ticket: open } if open == ticket) {
            tracing::debug!("Discarding stale dialog result");
            return;
        }

        match result.map(SelectedFile::new) {
            Ok(Some(file)) => {
                tracing::info!("Selected {}", file.name());
                self.phase = Phase::FileReady(file);
            }
            Ok(None) => {
                tracing::debug!("File dialog returned an empty path");
                self.reset();
            }
            Err(e) if e.is_cancellation() => {
                tracing::debug!("File selection cancelled");
                self.reset();
            }
            Err(e) => {
                tracing::warn!("File dialog failed: {}", e);
                self.reset();
            }
        }
    }

    /// Turn the drag overlay on. Repeats are harmless.
    pub fn on_drag_enter(&mut self) {
        self.hover = true;
    }

    /// Turn the drag overlay off. Repeats are harmless.
    pub fn on_drag_leave(&mut self) {
        self.hover = false;
    }

    /// Accept dropped paths. Only the first one is used.
    ///
    /// The overlay always goes away. While a transfer is in progress the
    /// drop is refused and the in-flight request is untouched. Returns
    /// whether the selection changed.
    pub fn on_drop<I, S>(&mut self, paths: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hover = false;

        if self.is_busy() {
            tracing::debug!("Drop ignored: transfer in progress");
            return false;
        }

        let mut paths = paths.into_iter();
        let Some(file) = paths.next().and_then(SelectedFile::new) else {
            return false;
        };
        let extra = paths.count();
        if extra > 0 {
            tracing::debug!("Ignoring {} extra dropped path(s)", extra);
        }

        tracing::info!("Dropped {}", file.name());
        self.phase = Phase::FileReady(file);
        true
    }

    /// Route a host drag-and-drop event.
    pub fn handle_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::FileDrop(paths) => {
                self.on_drop(paths);
            }
            HostEvent::FileDropHover => self.on_drag_enter(),
            HostEvent::FileDropCancelled => self.on_drag_leave(),
        }
    }
}

/// Split text pasted by a terminal drag-and-drop into paths.
///
/// Terminals deliver dropped files as text: paths separated by whitespace
/// or newlines, possibly quoted, with spaces backslash-escaped, or as
/// `file://` URIs. Backslashes are only escapes before whitespace or a
/// quote, so Windows paths pass through.
pub fn parse_dropped_paths(text: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                '\\' if chars
                    .peek()
                    .is_some_and(|n| n.is_whitespace() || *n == '\'' || *n == '"') =>
                {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        paths.push(decode_file_uri(&current));
                        current.clear();
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if in_token {
        paths.push(decode_file_uri(&current));
    }

    paths.retain(|p| !p.is_empty());
    paths
}

fn decode_file_uri(token: &str) -> String {
    let Some(rest) = token.strip_prefix("file://") else {
        return token.to_string();
    };
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    let decoded = percent_decode(rest);

    // file:///C:/x decodes to /C:/x
    let bytes = decoded.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        decoded[1..].to_string()
    } else {
        decoded
    }
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(b) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_newline_separated() {
        assert_eq!(
            parse_dropped_paths("/tmp/a.txt /tmp/b.txt\n/tmp/c.txt\n"),
            vec!["/tmp/a.txt", "/tmp/b.txt", "/tmp/c.txt"]
        );
        assert!(parse_dropped_paths("  \n ").is_empty());
    }

    #[test]
    fn test_parse_quoted_and_escaped() {
        assert_eq!(
            parse_dropped_paths("'/home/u/my report.pdf' /tmp/x"),
            vec!["/home/u/my report.pdf", "/tmp/x"]
        );
        assert_eq!(
            parse_dropped_paths("/home/u/my\\ report.pdf"),
            vec!["/home/u/my report.pdf"]
        );
        assert_eq!(
            parse_dropped_paths("\"C:\\Users\\u\\my file.txt\""),
            vec!["C:\\Users\\u\\my file.txt"]
        );
    }

    #[test]
    fn test_parse_windows_path_unquoted() {
        assert_eq!(
            parse_dropped_paths("C:\\Users\\u\\notes.txt"),
            vec!["C:\\Users\\u\\notes.txt"]
        );
    }

    #[test]
    fn test_parse_file_uris() {
        assert_eq!(
            parse_dropped_paths("file:///home/u/my%20report.pdf"),
            vec!["/home/u/my report.pdf"]
        );
        assert_eq!(
            parse_dropped_paths("file://localhost/tmp/a"),
            vec!["/tmp/a"]
        );
        assert_eq!(
            parse_dropped_paths("file:///C:/Users/u/a%2Bb.txt"),
            vec!["C:/Users/u/a+b.txt"]
        );
    }

    #[test]
    fn test_percent_decode_leaves_malformed_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%C3%A9"), "é");
    }
}
