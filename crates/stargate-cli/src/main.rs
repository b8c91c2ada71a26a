//! Stargate CLI - push a file to a peer on the local network
//!
//! Pick or drop one file, type the peer's address, press send. The actual
//! transfer is done by a configurable backend program.
//!
//! ## Quick Start
//!
//! ```bash
//! # Tell Stargate how to send
//! stargate config set backend.program /usr/local/bin/stargate-send
//!
//! # Send a file headlessly
//! stargate send ./report.pdf 192.168.1.42
//!
//! # Or open the terminal portal
//! stargate tui
//! ```

#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unused_async)]

use anyhow::Result;
use clap::Parser;

mod commands;
mod tui;

use commands::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => commands::send::run(args).await,
        Command::Tui(args) => commands::tui::run(args).await,
        Command::Config(args) => commands::config::run(args).await,
        Command::Completions(args) => commands::completions::run(args.shell),
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stargate=info,stargate_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
