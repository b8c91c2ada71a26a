//! Values that flow through a portal session.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::display_name;
use crate::error::{Error, Result};

/// Path of the file the user picked or dropped.
///
/// Opaque on purpose: it may come from a shell whose path conventions
/// differ from the host running the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectedFile(String);

impl SelectedFile {
    /// Wrap a path. Returns `None` for an empty string.
    pub fn new(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        if path.is_empty() {
            None
        } else {
            Some(Self(path))
        }
    }

    /// The full path as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path component, for display.
    pub fn name(&self) -> &str {
        display_name(&self.0)
    }
}

impl fmt::Display for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Peer address as typed by the user, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetAddress(String);

impl TargetAddress {
    /// Trim `raw` and reject it if nothing is left.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTargetAddress`] for blank input.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingTargetAddress);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file going to one address. Built only at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    id: Uuid,
    file: SelectedFile,
    target: TargetAddress,
}

impl TransferRequest {
    /// Pair a file with a target under a fresh id.
    pub fn new(file: SelectedFile, target: TargetAddress) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            target,
        }
    }

    /// Correlation id for logs and completions.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The file to send.
    pub fn file(&self) -> &SelectedFile {
        &self.file
    }

    /// Where to send it.
    pub fn target(&self) -> &TargetAddress {
        &self.target
    }
}

/// What the portal shows, as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Nothing selected
    #[default]
    Idle,
    /// A file is selected and waiting for send
    FileReady,
    /// Something is being dragged over the drop target
    DragHover,
    /// A transfer is in flight or its outcome is on display
    Processing,
}

impl SessionState {
    /// Short lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileReady => "file_ready",
            Self::DragHover => "drag_hover",
            Self::Processing => "processing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_file_rejects_empty() {
        assert!(SelectedFile::new("").is_none());
        let file = SelectedFile::new("C:\\Users\\u\\my report.pdf").unwrap();
        assert_eq!(file.name(), "my report.pdf");
    }

    #[test]
    fn test_target_address_trims() {
        let target = TargetAddress::parse("  192.168.1.42 \n").unwrap();
        assert_eq!(target.as_str(), "192.168.1.42");

        assert!(matches!(
            TargetAddress::parse(" \t "),
            Err(Error::MissingTargetAddress)
        ));
        assert!(matches!(
            TargetAddress::parse(""),
            Err(Error::MissingTargetAddress)
        ));
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let make = || {
            TransferRequest::new(
                SelectedFile::new("/a").unwrap(),
                TargetAddress::parse("h").unwrap(),
            )
        };
        assert_ne!(make().id(), make().id());
    }

    #[test]
    fn test_request_serializes_flat_strings() {
        let req = TransferRequest::new(
            SelectedFile::new("/home/u/report.pdf").unwrap(),
            TargetAddress::parse("192.168.1.42").unwrap(),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["file"], "/home/u/report.pdf");
        assert_eq!(json["target"], "192.168.1.42");
    }
}
