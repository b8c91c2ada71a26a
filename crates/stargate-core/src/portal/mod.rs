//! The portal: one file, one address, one send.
//!
//! A [`SessionController`] owns the whole session. Front-ends forward user
//! input to it (dialog picks, drops, hover changes, submissions), call
//! [`SessionController::poll`] on their tick, and render from
//! [`SessionController::state`] and [`SessionController::status`].
//!
//! ```text
//! Idle --pick/drop--> FileReady --submit--> Processing --outcome--> (delay) --> Idle
//! ```
//!
//! The drag overlay sits on top of `Idle` and `FileReady` and never changes
//! the selection by itself.

mod controller;
mod display;
mod input;
mod request;
mod status;

pub use controller::SessionController;
pub use display::display_name;
pub use input::{parse_dropped_paths, HostEvent};
pub use request::{SelectedFile, SessionState, TargetAddress, TransferRequest};
pub use status::{StatusKind, StatusLine, StatusMessage};
