//! Error types for Stargate.
//!
//! One error type covers the whole library. Its `Display` output is what
//! ends up on the portal's status line, so validation variants carry the
//! exact sentences users see.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// A specialized `Result` type for Stargate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Stargate.
#[derive(Error, Debug)]
pub enum Error {
    /// Send pressed with no file picked or dropped
    #[error("No file selected.")]
    NoFileSelected,

    /// Send pressed with a blank target address
    #[error("Please enter a target IP address.")]
    MissingTargetAddress,

    /// A transfer is already in flight or its outcome is still on display
    #[error("a transfer is already in progress")]
    Busy,

    /// The file dialog was dismissed without a selection
    #[error("no file was selected")]
    DialogCancelled,

    /// The file dialog failed
    #[error("file dialog failed: {0}")]
    Dialog(String),

    /// Transfer backend reported a failure (message is shown verbatim)
    #[error("{0}")]
    Backend(String),

    /// No transfer backend is configured
    #[error("no transfer backend configured")]
    NoBackend,

    /// Backend did not answer in time
    #[error("transfer timed out after {}", format_limit(.0))]
    Timeout(Duration),

    /// Configuration file error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Reason for invalidity
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns whether this error was caught locally, before any backend
    /// was contacted.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::NoFileSelected | Self::MissingTargetAddress)
    }

    /// Returns whether this error is a dismissed dialog, which is not a
    /// failure from the user's point of view.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::DialogCancelled)
    }

    /// Returns a helpful suggestion for resolving the error, if applicable.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoBackend => Some(
                "Point Stargate at a sender program, for example:\n\
                   stargate config set backend.program /usr/local/bin/stargate-send",
            ),
            Self::MissingTargetAddress => Some(
                "Pass the peer address on the command line or set a default:\n\
                   stargate config set portal.default_target 192.168.1.42",
            ),
            Self::Timeout(_) => Some(
                "Raise or remove the limit:\n\
                   stargate config set backend.timeout 10m",
            ),
            _ => None,
        }
    }
}

/// `1.5s`, `250ms` or `5s`.
fn format_limit(limit: &Duration) -> String {
    if limit.as_secs() == 0 {
        format!("{}ms", limit.as_millis())
    } else if limit.subsec_millis() == 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{:.1}s", limit.as_secs_f64())
    }
}
