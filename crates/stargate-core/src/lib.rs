//! # Stargate Core Library
//!
//! `stargate-core` holds everything behind the Stargate portal: the state
//! machine that turns file picks, drops and send presses into exactly one
//! request to a transfer backend, and back into a clean idle state once the
//! backend answers.
//!
//! ## Modules
//!
//! - [`portal`] - Session controller, input unifier and status line
//! - [`backend`] - File dialog and transfer capability traits, command backend
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stargate_core::backend::{CommandBackend, NoDialog};
//! use stargate_core::portal::SessionController;
//!
//! let backend = Arc::new(CommandBackend::from_config(&config.backend));
//! let mut portal = SessionController::new(backend, Arc::new(NoDialog), config.portal.status_clear_delay);
//!
//! portal.on_drop(["/home/u/report.pdf"]);
//! portal.submit("192.168.1.42")?;
//! portal.settle().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod config;
pub mod error;
pub mod portal;

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default time a terminal status message stays on screen, in seconds
pub const DEFAULT_STATUS_CLEAR_SECS: u64 = 4;

/// Default UI tick rate in milliseconds
pub const DEFAULT_TICK_RATE_MS: u64 = 100;
