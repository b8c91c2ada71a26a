//! Capabilities the portal consumes but does not implement.
//!
//! The portal never opens sockets or windows itself. It talks to two
//! collaborators through these traits:
//!
//! - [`FileDialog`] asks the host shell for one file path
//! - [`TransferBackend`] pushes one file to one address
//!
//! Both are object safe so front-ends can hand the controller an
//! `Arc<dyn ...>` of whatever their shell provides.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::portal::TransferRequest;

mod command;

pub use command::{expand_args, CommandBackend};

/// Asks the host shell for a file.
#[async_trait]
pub trait FileDialog: Send + Sync {
    /// Show the dialog and wait for the user.
    ///
    /// # Errors
    ///
    /// [`Error::DialogCancelled`] when dismissed, [`Error::Dialog`] when the
    /// shell could not show it.
    async fn open_file_dialog(&self) -> Result<String>;
}

/// Performs the actual network send of a file.
#[async_trait]
pub trait TransferBackend: Send + Sync {
    /// Send `request.file` to `request.target`.
    ///
    /// Called at most once per submission. The error's `Display` text is
    /// shown to the user verbatim.
    async fn send_file(&self, request: &TransferRequest) -> Result<()>;
}

/// Dialog for shells that have none, such as the headless `send` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDialog;

#[async_trait]
impl FileDialog for NoDialog {
    async fn open_file_dialog(&self) -> Result<String> {
        Err(Error::Dialog("no file dialog available".to_string()))
    }
}
