//! Acquisition steps run before a document is fetched.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use docsplit_core::{AcquisitionConfig, Acquirer, DocsplitError, Result};

/// Acquirer for sources that are populated ahead of time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAcquirer;

#[async_trait]
impl Acquirer for NoopAcquirer {
    async fn acquire(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

/// Runs an external program that stores the document in the source.
///
/// The program receives `{"url": "<id>"}` on stdin and must exit with
/// status zero within the timeout.
#[derive(Debug, Clone)]
pub struct CommandAcquirer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAcquirer {
    /// Create an acquirer running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(60),
        }
    }

    /// Set the time allowed for the program.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from configuration. Returns None when no command is set.
    pub fn from_config(config: &AcquisitionConfig) -> Result<Option<Self>> {
        let Some(command) = &config.command else {
            return Ok(None);
        };
        let (program, args) = command
            .split_first()
            .ok_or_else(|| DocsplitError::config("acquisition.command must not be empty"))?;

        Ok(Some(
            Self::new(program.clone(), args.to_vec())
                .with_timeout(Duration::from_secs(config.timeout_secs)),
        ))
    }

    async fn run(&self, id: &str) -> Result<()> {
        let payload = serde_json::json!({ "url": id }).to_string();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DocsplitError::acquisition_failed(id, format!("failed to spawn {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes()).await.map_err(|e| {
                DocsplitError::acquisition_failed(id, format!("failed to write payload: {}", e))
            })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DocsplitError::acquisition_failed(id, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocsplitError::acquisition_failed(
                id,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Acquirer for CommandAcquirer {
    async fn acquire(&self, id: &str) -> Result<()> {
        debug!("Running {} for {}", self.program, id);

        match tokio::time::timeout(self.timeout, self.run(id)).await {
            Ok(Ok(())) => {
                info!("Acquisition completed for {}", id);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Acquisition failed for {}: {}", id, e);
                Err(e)
            }
            Err(_) => {
                warn!("Acquisition timed out for {} after {:?}", id, self.timeout);
                Err(DocsplitError::acquisition_failed(
                    id,
                    format!("timed out after {:?}", self.timeout),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop() {
        assert!(NoopAcquirer.acquire("anything").await.is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = AcquisitionConfig::default();
        assert!(CommandAcquirer::from_config(&config).unwrap().is_none());

        let config = AcquisitionConfig {
            command: Some(vec![]),
            timeout_secs: 5,
        };
        assert!(CommandAcquirer::from_config(&config).is_err());

        let config = AcquisitionConfig {
            command: Some(vec!["scrape".to_string(), "--store".to_string()]),
            timeout_secs: 5,
        };
        let acquirer = CommandAcquirer::from_config(&config).unwrap().unwrap();
        assert_eq!(acquirer.program, "scrape");
        assert_eq!(acquirer.args, vec!["--store"]);
        assert_eq!(acquirer.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let acquirer = CommandAcquirer::new("docsplit-no-such-program", vec![]);
        let err = acquirer.acquire("a").await.unwrap_err();
        assert_eq!(err.error_code(), "ACQUISITION_FAILED");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_success_reads_payload() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("payload.json");
        let script = format!("cat > {}", out.display());

        let acquirer = CommandAcquirer::new("sh", vec!["-c".to_string(), script]);
        acquirer.acquire("https://example.com/docs/a").await.unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(payload["url"], "https://example.com/docs/a");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_failure() {
        let acquirer = CommandAcquirer::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null; echo boom >&2; exit 3".to_string()],
        );
        let err = acquirer.acquire("a").await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_timeout() {
        let acquirer = CommandAcquirer::new("sh", vec!["-c".to_string(), "sleep 5".to_string()])
            .with_timeout(Duration::from_millis(100));
        let err = acquirer.acquire("a").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
