//! Terminal front-end for the portal.
//!
//! One screen: a drop zone, a target address field, a send control and
//! the status line. Terminals report a file dragged onto them as pasted
//! text, so bracketed paste is how drops arrive here; the file dialog is
//! an in-terminal file browser.
//!
//! # Usage
//!
//! ```bash
//! stargate tui
//! stargate tui --target 192.168.1.42 --theme light
//! ```
//!
//! # Architecture
//!
//! The TUI is built using `ratatui` and `crossterm`:
//!
//! - `app`: Main loop, terminal setup, action handling
//! - `state`: Front-end state (focus, target field, browser, log)
//! - `action`: User action types
//! - `event`: Terminal event polling and key/paste mapping
//! - `dialog`: File dialog bridge to the file browser
//! - `layout`: Screen layout
//! - `components`: Widgets
//! - `theme`: Color themes

#![allow(
    clippy::use_self,
    clippy::missing_const_for_fn,
    clippy::match_same_arms,
    clippy::option_if_let_else
)]

pub mod action;
pub mod app;
pub mod components;
pub mod dialog;
pub mod event;
pub mod layout;
pub mod state;
pub mod theme;

pub use app::TuiArgs;

use stargate_core::config::Config;

use app::App;

/// Run the TUI application.
pub async fn run(args: TuiArgs, config: Config) -> anyhow::Result<()> {
    let _guard = suppress_logging();

    let mut app = App::new(args, &config)?;
    app.run().await
}

/// Keep log output off the alternate screen. The returned guard restores
/// the default subscriber when dropped.
fn suppress_logging() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::layer::SubscriberExt;

    let noop_subscriber =
        tracing_subscriber::registry().with(tracing_subscriber::filter::LevelFilter::OFF);

    tracing::subscriber::set_default(noop_subscriber)
}
