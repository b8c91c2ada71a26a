//! The portal's single status line.

use serde::Serialize;
use tokio::time::Instant;

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Neutral progress text
    Info,
    /// Transfer went through
    Success,
    /// Validation or backend failure
    Error,
}

/// Text shown on the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    /// Tone
    pub kind: StatusKind,
    /// Exact text
    pub text: String,
}

impl StatusMessage {
    /// Neutral message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    /// Success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    /// Failure message, prefixed with `Error: `.
    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            kind: StatusKind::Error,
            text: format!("Error: {detail}"),
        }
    }
}

/// One message plus the instant it should disappear.
///
/// Setting a message replaces its deadline too, so an old deadline can
/// never clear a newer message.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    message: Option<StatusMessage>,
    clear_at: Option<Instant>,
}

impl StatusLine {
    /// Show `message` until `clear_at`, or until replaced when `None`.
    pub fn set(&mut self, message: StatusMessage, clear_at: Option<Instant>) {
        self.message = Some(message);
        self.clear_at = clear_at;
    }

    /// Current message, if any.
    pub fn current(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// When the current message goes away.
    pub fn clear_at(&self) -> Option<Instant> {
        self.clear_at
    }

    /// Drop the message if its deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        if self.clear_at.is_some_and(|at| now >= at) {
            self.message = None;
            self.clear_at = None;
        }
    }
}
