//! Common test utilities for `Stargate` integration tests.
//!
//! Scripted stand-ins for the two capabilities the portal consumes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use stargate_core::backend::{FileDialog, TransferBackend};
use stargate_core::portal::{SessionController, TransferRequest};
use stargate_core::{Error, Result};

/// Default display delay used by the tests.
pub const DELAY: Duration = Duration::from_secs(4);

/// Backend that records calls and answers as scripted.
#[derive(Default)]
pub struct MockBackend {
    calls: AtomicUsize,
    seen: Mutex<Vec<TransferRequest>>,
    failure: Option<String>,
    gate: Option<Arc<Notify>>,
}

impl MockBackend {
    /// Succeeds immediately.
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fails with `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            ..Self::default()
        })
    }

    /// Succeeds once `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            gate: Some(gate),
            ..Self::default()
        })
    }

    /// Number of `send_file` invocations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, in order.
    pub fn seen(&self) -> Vec<TransferRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransferBackend for MockBackend {
    async fn send_file(&self, request: &TransferRequest) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.failure {
            Some(message) => Err(Error::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// Dialog that returns a fixed answer, optionally after a gate opens.
pub struct MockDialog {
    answer: Option<String>,
    gate: Option<Arc<Notify>>,
    opened: AtomicUsize,
}

impl MockDialog {
    /// User picks `path`.
    pub fn picks(path: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(path.to_string()),
            gate: None,
            opened: AtomicUsize::new(0),
        })
    }

    /// User dismisses the dialog.
    pub fn cancels() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            gate: None,
            opened: AtomicUsize::new(0),
        })
    }

    /// User picks `path`, but only once `gate` is notified.
    pub fn picks_after(path: &str, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(path.to_string()),
            gate: Some(gate),
            opened: AtomicUsize::new(0),
        })
    }

    /// User dismisses the dialog once `gate` is notified.
    pub fn cancels_after(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            gate: Some(gate),
            opened: AtomicUsize::new(0),
        })
    }

    /// Number of times the dialog was shown.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileDialog for MockDialog {
    async fn open_file_dialog(&self) -> Result<String> {
        self.opened.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.answer.clone().ok_or(Error::DialogCancelled)
    }
}

/// Controller wired to the given mocks with the default delay.
pub fn portal(backend: Arc<MockBackend>, dialog: Arc<MockDialog>) -> SessionController {
    SessionController::new(backend, dialog, DELAY)
}

/// Let spawned capability tasks run, then apply what they reported.
pub async fn run_pending(portal: &mut SessionController) {
    tokio::time::sleep(Duration::from_millis(1)).await;
    portal.poll();
}
