//! Transfer backend that delegates to an external program.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::TransferBackend;
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::portal::{display_name, TransferRequest};

/// Runs a configured program once per transfer.
///
/// Exit status 0 means success. Anything else fails the transfer with the
/// program's trimmed stderr, or `exited with status N` when stderr is empty.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: Option<String>,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandBackend {
    /// Create a backend for `program` with argument templates.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: Some(program.into()),
            args,
            timeout: None,
        }
    }

    /// Build from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout,
        }
    }

    /// Limit how long a single transfer may take.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a program is configured at all.
    pub fn is_configured(&self) -> bool {
        self.program.is_some()
    }

    async fn run(&self, program: &str, request: &TransferRequest) -> Result<()> {
        let args = expand_args(&self.args, request);
        tracing::debug!("Running backend: {} {:?}", program, args);

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Backend(format!("Failed to start '{program}': {e}")))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            let code = output
                .status
                .code()
                .map_or_else(|| "unknown".to_string(), |c| c.to_string());
            Err(Error::Backend(format!("exited with status {code}")))
        } else {
            Err(Error::Backend(stderr.to_string()))
        }
    }
}

#[async_trait]
impl TransferBackend for CommandBackend {
    async fn send_file(&self, request: &TransferRequest) -> Result<()> {
        let Some(program) = self.program.as_deref() else {
            return Err(Error::NoBackend);
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run(program, request))
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => self.run(program, request).await,
        }
    }
}

/// Substitute `{file}`, `{target}` and `{name}` in each argument template.
pub fn expand_args(templates: &[String], request: &TransferRequest) -> Vec<String> {
    templates
        .iter()
        .map(|t| {
            t.replace("{file}", request.file().as_str())
                .replace("{target}", request.target().as_str())
                .replace("{name}", display_name(request.file().as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::{SelectedFile, TargetAddress};

    fn request(file: &str, target: &str) -> TransferRequest {
        TransferRequest::new(
            SelectedFile::new(file).unwrap(),
            TargetAddress::parse(target).unwrap(),
        )
    }

    #[test]
    fn test_expand_args() {
        let req = request("/home/u/report.pdf", "192.168.1.42");
        let templates = vec![
            "--to={target}".to_string(),
            "{file}".to_string(),
            "--as".to_string(),
            "{name}".to_string(),
        ];

        assert_eq!(
            expand_args(&templates, &req),
            vec!["--to=192.168.1.42", "/home/u/report.pdf", "--as", "report.pdf"]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_backend_fails() {
        let backend = CommandBackend::from_config(&BackendConfig::default());
        assert!(!backend.is_configured());

        let err = backend
            .send_file(&request("/tmp/a", "10.0.0.1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoBackend));
    }

    #[tokio::test]
    async fn test_missing_program_is_backend_error() {
        let backend = CommandBackend::new("stargate-no-such-program-xyz", vec![]);
        let err = backend
            .send_file(&request("/tmp/a", "10.0.0.1"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to start"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_mapping() {
        let ok = CommandBackend::new("sh", vec!["-c".into(), "exit 0".into()]);
        assert!(ok.send_file(&request("/tmp/a", "h")).await.is_ok());

        let silent = CommandBackend::new("sh", vec!["-c".into(), "exit 3".into()]);
        let err = silent.send_file(&request("/tmp/a", "h")).await.unwrap_err();
        assert_eq!(err.to_string(), "exited with status 3");

        let noisy = CommandBackend::new(
            "sh",
            vec!["-c".into(), "echo 'peer refused {name}' >&2; exit 1".into()],
        );
        let err = noisy
            .send_file(&request("/tmp/notes.txt", "h"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "peer refused notes.txt");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let slow = CommandBackend::new("sh", vec!["-c".into(), "sleep 5".into()])
            .with_timeout(Duration::from_millis(50));
        let err = slow.send_file(&request("/tmp/a", "h")).await.unwrap_err();
        assert!(matches!(err, Error::Timeout(limit) if limit == Duration::from_millis(50)));
        assert_eq!(err.to_string(), "transfer timed out after 50ms");
    }
}
