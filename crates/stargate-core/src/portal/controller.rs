//! Transfer session controller.
//!
//! Owns the session phase and is the only caller of the transfer backend.
//! Capability calls run on spawned tasks and report back over a channel;
//! their results are applied here, on the task that owns the controller,
//! so nothing else ever writes session state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use uuid::Uuid;

use super::request::{SelectedFile, SessionState, TargetAddress, TransferRequest};
use super::status::{StatusLine, StatusMessage};
use crate::backend::{FileDialog, TransferBackend};
use crate::config::MAX_DURATION;
use crate::error::{Error, Result};

/// Primary session phase. The hover overlay is tracked separately.
#[derive(Debug)]
pub(super) enum Phase {
    Idle,
    /// File dialog is open
    Picking { ticket: u64 },
    FileReady(SelectedFile),
    Processing(TransferRequest),
    /// Outcome is on display; reset happens at `reset_at`
    Settling {
        request: TransferRequest,
        reset_at: Instant,
    },
}

/// Result of a capability call, sent back to the owning task.
#[derive(Debug)]
pub(super) enum Completion {
    Picked { ticket: u64, result: Result<String> },
    Sent { id: Uuid, result: Result<()> },
}

/// Single owner of a portal session.
///
/// Every input goes through a guarded method on this type. Inputs that
/// would alter the session while a transfer is in progress are refused;
/// hover changes are always accepted since they are cosmetic.
pub struct SessionController {
    pub(super) phase: Phase,
    pub(super) hover: bool,
    status: StatusLine,
    display_delay: Duration,
    pub(super) next_ticket: u64,
    backend: Arc<dyn TransferBackend>,
    pub(super) dialog: Arc<dyn FileDialog>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl SessionController {
    /// Create an idle controller.
    ///
    /// `display_delay` is how long a finished transfer's outcome stays on
    /// screen before the session resets. It is capped at
    /// [`MAX_DURATION`].
    pub fn new(
        backend: Arc<dyn TransferBackend>,
        dialog: Arc<dyn FileDialog>,
        display_delay: Duration,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            phase: Phase::Idle,
            hover: false,
            status: StatusLine::default(),
            display_delay: display_delay.min(MAX_DURATION),
            next_ticket: 0,
            backend,
            dialog,
            completion_tx,
            completion_rx,
        }
    }

    /// Current state as shown to the user.
    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Processing(_) | Phase::Settling { .. } => SessionState::Processing,
            _ if self.hover => SessionState::DragHover,
            Phase::FileReady(_) => SessionState::FileReady,
            Phase::Idle | Phase::Picking { .. } => SessionState::Idle,
        }
    }

    /// The file this session is about, until the session resets.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.phase {
            Phase::FileReady(file) => Some(file),
            Phase::Processing(request) | Phase::Settling { request, .. } => Some(request.file()),
            Phase::Idle | Phase::Picking { .. } => None,
        }
    }

    /// The request currently with the backend.
    pub fn in_flight(&self) -> Option<&TransferRequest> {
        match &self.phase {
            Phase::Processing(request) => Some(request),
            _ => None,
        }
    }

    /// Whether the file dialog is open.
    pub fn is_picking(&self) -> bool {
        matches!(self.phase, Phase::Picking { .. })
    }

    /// Whether the drag overlay is on.
    pub fn is_hovering(&self) -> bool {
        self.hover
    }

    /// Whether a transfer is in flight or its outcome is on display.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Processing(_) | Phase::Settling { .. })
    }

    /// Whether the send control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }

    /// Current status line text.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.current()
    }

    /// How long outcomes stay on display.
    pub fn display_delay(&self) -> Duration {
        self.display_delay
    }

    /// Validate and dispatch the selected file to `target`.
    ///
    /// `target` is the live value of the address field; it is trimmed here.
    /// Returns the id of the dispatched request.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] while a transfer is in progress; nothing changes.
    /// - [`Error::NoFileSelected`] or [`Error::MissingTargetAddress`]; the
    ///   message is put on the status line and the backend is not called.
    pub fn submit(&mut self, target: &str) -> Result<Uuid> {
        if self.is_busy() {
            tracing::debug!("Submit ignored: transfer already in progress");
            return Err(Error::Busy);
        }

        let request = match self.build_request(target) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Submit rejected: {}", e);
                self.status.set(
                    StatusMessage::error(&e),
                    Some(Instant::now() + self.display_delay),
                );
                return Err(e);
            }
        };

        let id = request.id();
        tracing::info!(
            "Engaging portal: sending '{}' to {} ({})",
            request.file(),
            request.target(),
            id
        );
        self.status.set(
            StatusMessage::info(format!("Engaging portal for {}...", request.target())),
            None,
        );

        let backend = Arc::clone(&self.backend);
        let dispatched = request.clone();
        self.spawn_guarded(
            async move { backend.send_file(&dispatched).await },
            move |result| Completion::Sent { id, result },
        );

        self.phase = Phase::Processing(request);
        Ok(id)
    }

    fn build_request(&self, target: &str) -> Result<TransferRequest> {
        let Phase::FileReady(file) = &self.phase else {
            return Err(Error::NoFileSelected);
        };
        let target = TargetAddress::parse(target)?;
        Ok(TransferRequest::new(file.clone(), target))
    }

    /// Apply finished capability calls and due timers without waiting.
    pub fn poll(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
        }
        self.tick(Instant::now());
    }

    /// Wait for an open dialog or in-flight transfer to report back.
    ///
    /// Returns immediately when neither is pending. A transfer's outcome is
    /// on the status line when this returns; the reset is still ahead.
    pub async fn wait_for_completion(&mut self) {
        self.poll();
        while matches!(self.phase, Phase::Processing(_) | Phase::Picking { .. }) {
            // The sender half lives in `self`, so this never yields `None`.
            let Some(completion) = self.completion_rx.recv().await else {
                break;
            };
            self.apply(completion);
        }
    }

    /// Wait until the session is at rest: no dialog open, no transfer in
    /// flight, and any outcome's display time has elapsed.
    pub async fn settle(&mut self) {
        loop {
            self.wait_for_completion().await;

            match self.reset_deadline() {
                Some(reset_at) => {
                    tokio::time::sleep_until(reset_at).await;
                    self.poll();
                }
                None => break,
            }
        }
    }

    /// Next instant at which [`poll`](Self::poll) will change something on
    /// its own.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.reset_deadline(), self.status.clear_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn reset_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Settling { reset_at, .. } => Some(reset_at),
            _ => None,
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Picked { ticket, result } => self.finish_pick(ticket, result),
            Completion::Sent { id, result } => self.resolve(id, result),
        }
    }

    /// The single resolution path for a dispatched request.
    fn resolve(&mut self, id: Uuid, result: Result<()>) {
        let request = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Processing(request) if request.id() == id => request,
            other => {
                tracing::debug!("Discarding stale transfer result {}", id);
                self.phase = other;
                return;
            }
        };

        let message = match result {
            Ok(()) => {
                tracing::info!(
                    "Transfer of '{}' to {} succeeded",
                    request.file().name(),
                    request.target()
                );
                StatusMessage::success("Transfer successful!")
            }
            Err(e) => {
                tracing::warn!(
                    "Transfer of '{}' to {} failed: {}",
                    request.file().name(),
                    request.target(),
                    e
                );
                StatusMessage::error(e)
            }
        };

        let reset_at = Instant::now() + self.display_delay;
        self.status.set(message, Some(reset_at));
        self.phase = Phase::Settling { request, reset_at };
    }

    fn tick(&mut self, now: Instant) {
        if self.reset_deadline().is_some_and(|at| now >= at) {
            self.reset();
        }
        self.status.expire(now);
    }

    /// Back to idle: no file, no overlays, send enabled.
    pub(super) fn reset(&mut self) {
        tracing::debug!("Portal reset");
        self.phase = Phase::Idle;
        self.hover = false;
    }

    /// Run a capability call on its own task and report its result, even
    /// if the call panics.
    pub(super) fn spawn_guarded<T, F, W>(&self, call: F, wrap: W)
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
        W: FnOnce(Result<T>) -> Completion + Send + 'static,
    {
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = tokio::spawn(call)
                .await
                .unwrap_or_else(|e| Err(Error::Internal(format!("capability task failed: {e}"))));
            let _ = tx.send(wrap(result));
        });
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase)
            .field("hover", &self.hover)
            .field("status", &self.status.current())
            .finish_non_exhaustive()
    }
}
