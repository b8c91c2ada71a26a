//! File dialog backed by the TUI's file browser.
//!
//! The portal calls [`FileDialog::open_file_dialog`] from a spawned task.
//! That call hands a reply channel to the app loop, which opens the file
//! browser and answers once the user picks a file or closes it.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use stargate_core::backend::FileDialog;
use stargate_core::{Error, Result};

/// Where the app loop sends the picked path.
pub type DialogReply = oneshot::Sender<Result<String>>;

/// [`FileDialog`] that asks the app loop to show its file browser.
#[derive(Debug, Clone)]
pub struct TuiFileDialog {
    requests: mpsc::UnboundedSender<DialogReply>,
}

impl TuiFileDialog {
    /// Create the dialog and the receiver the app loop drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DialogReply>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }
}

#[async_trait]
impl FileDialog for TuiFileDialog {
    async fn open_file_dialog(&self) -> Result<String> {
        let (reply, answer) = oneshot::channel();
        self.requests
            .send(reply)
            .map_err(|_| Error::Dialog("terminal is closing".to_string()))?;

        // A dropped reply means the browser went away without a pick.
        answer.await.unwrap_or(Err(Error::DialogCancelled))
    }
}
