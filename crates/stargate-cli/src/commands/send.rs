//! Send command implementation.
//!
//! Runs one portal session without a screen: the file argument is dropped
//! on the portal, the target is submitted, and the command waits for the
//! backend's answer.

use std::sync::Arc;

use anyhow::{bail, Result};

use stargate_core::backend::{CommandBackend, NoDialog};
use stargate_core::config::Config;
use stargate_core::portal::{SessionController, StatusKind};
use stargate_core::Error;

use super::SendArgs;

/// Run the send command.
pub async fn run(args: SendArgs) -> Result<()> {
    let config = super::load_config();

    if !args.file.exists() {
        bail!("File not found: {}", args.file.display());
    }

    let backend = build_backend(&config, args.backend.as_deref());
    let configured = backend.is_configured();
    let mut portal = SessionController::new(
        Arc::new(backend),
        Arc::new(NoDialog),
        config.portal.status_clear_delay,
    );

    let target = args
        .target
        .clone()
        .or_else(|| config.portal.default_target.clone())
        .unwrap_or_default();

    portal.on_drop([args.file.display().to_string()]);
    let file_name = portal
        .selected_file()
        .map(|f| f.name().to_string())
        .unwrap_or_default();

    if !args.quiet && !args.json {
        println!();
        println!("Stargate v{}", stargate_core::VERSION);
        println!("{}", "-".repeat(37));
        println!();
    }

    let id = match portal.submit(&target) {
        Ok(id) => id,
        Err(e) => return report_rejected(&e, &args),
    };

    if !args.quiet && !args.json {
        if let Some(status) = portal.status() {
            println!("  {}", status.text);
        }
    }

    portal.wait_for_completion().await;

    let Some(status) = portal.status().cloned() else {
        bail!("Transfer finished without an outcome");
    };
    let success = status.kind == StatusKind::Success;

    if args.json {
        let output = serde_json::json!({
            "id": id.to_string(),
            "file": args.file.display().to_string(),
            "name": file_name,
            "target": target.trim(),
            "success": success,
            "status": status.text,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !args.quiet {
        println!();
        println!("  {}", status.text);
        println!();
    }

    if success {
        return Ok(());
    }

    if !configured && !args.json {
        if let Some(hint) = Error::NoBackend.suggestion() {
            eprintln!("{hint}");
            eprintln!();
        }
    }
    bail!("Transfer of '{}' to {} failed", file_name, target.trim())
}

/// Backend from config, with the program optionally overridden.
fn build_backend(config: &Config, program: Option<&str>) -> CommandBackend {
    let Some(program) = program else {
        return CommandBackend::from_config(&config.backend);
    };

    let backend = CommandBackend::new(program, config.backend.args.clone());
    match config.backend.timeout {
        Some(limit) => backend.with_timeout(limit),
        None => backend,
    }
}

/// Print a locally rejected submission and fail.
fn report_rejected(error: &Error, args: &SendArgs) -> Result<()> {
    if args.json {
        let output = serde_json::json!({
            "file": args.file.display().to_string(),
            "success": false,
            "status": format!("Error: {error}"),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(hint) = error.suggestion() {
        eprintln!("{hint}");
        eprintln!();
    }

    Err(anyhow::anyhow!("{error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_backend_override() {
        let config = Config::default();
        assert!(!build_backend(&config, None).is_configured());
        assert!(build_backend(&config, Some("/bin/true")).is_configured());
    }
}
