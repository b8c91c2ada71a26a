//! CLI command definitions and handlers.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Load configuration with graceful fallback to defaults.
///
/// A missing file yields defaults. A broken one is reported once and then
/// ignored, so a typo in the config never blocks a send.
pub fn load_config() -> stargate_core::config::Config {
    match stargate_core::config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring configuration: {}", e);
            stargate_core::config::Config::default()
        }
    }
}

pub mod completions;
pub mod config;
pub mod send;
pub mod tui;

/// Stargate - push a file to a peer on the local network
#[derive(Parser)]
#[command(name = "stargate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand)]
pub enum Command {
    /// Send one file to a peer address
    Send(SendArgs),

    /// Open the terminal portal
    Tui(TuiArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the send command
#[derive(Parser)]
pub struct SendArgs {
    /// File to send
    pub file: PathBuf,

    /// Peer address (falls back to portal.default_target)
    pub target: Option<String>,

    /// Override the backend program for this run
    #[arg(long, env = "STARGATE_BACKEND")]
    pub backend: Option<String>,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the tui command
#[derive(Parser)]
pub struct TuiArgs {
    /// Theme to use (dark, light)
    #[arg(long)]
    pub theme: Option<String>,

    /// Pre-fill the target address field
    #[arg(long, short)]
    pub target: Option<String>,
}

/// Arguments for the config command
#[derive(Parser)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set (use "none" to unset optional keys)
        value: String,
    },

    /// Show all configuration
    Show,

    /// Show the configuration file path
    Path,

    /// Reset to defaults
    Reset,
}

/// Arguments for the completions command
#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: ShellType,
}

/// Supported shell types for completions
#[derive(Clone, Copy, ValueEnum, Debug)]
pub enum ShellType {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from(["stargate", "send", "./report.pdf", "192.168.1.42", "--json"])
            .unwrap();
        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert_eq!(args.file, PathBuf::from("./report.pdf"));
        assert_eq!(args.target.as_deref(), Some("192.168.1.42"));
        assert!(args.json);
    }

    #[test]
    fn test_parse_send_without_target() {
        let cli = Cli::try_parse_from(["stargate", "send", "a.txt"]).unwrap();
        let Command::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert!(args.target.is_none());
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["stargate", "config", "set", "ui.theme", "light"]).unwrap();
        let Command::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert!(matches!(
            args.action,
            ConfigAction::Set { ref key, ref value } if key == "ui.theme" && value == "light"
        ));
    }
}
