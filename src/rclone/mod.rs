//! rclone subprocess layer
//!
//! Everything that shells out to rclone goes through the `Rclone` handle.
//! Arguments are always passed structurally, never assembled into a shell
//! string, and every invocation carries a hard timeout.

pub mod mount;
pub mod probe;

use crate::config::Config;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default bound on a connection probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from running the rclone binary
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to start rclone ({binary}): {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rclone did not finish: {0}")]
    Wait(#[from] std::io::Error),

    #[error("rclone timed out after {0:?}")]
    Timeout(Duration),

    #[error("rclone exited unsuccessfully: {0}")]
    Failed(String),

    #[error("Failed to parse rclone output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Captured output of a finished rclone invocation
#[derive(Debug)]
pub struct RcloneOutput {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RcloneOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Handle to the rclone binary
#[derive(Debug, Clone)]
pub struct Rclone {
    binary: String,
    timeout: Duration,
    scratch_dir: Option<PathBuf>,
}

impl Default for Rclone {
    fn default() -> Self {
        Self::new("rclone")
    }
}

impl Rclone {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            scratch_dir: None,
        }
    }

    /// Build a handle from the application config
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.rclone.binary).with_timeout(Duration::from_secs(config.rclone.probe_timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory for single-use probe config files (defaults to the system
    /// temp directory)
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn scratch_dir(&self) -> Option<&PathBuf> {
        self.scratch_dir.as_ref()
    }

    /// Run rclone with the given arguments, bounded by the handle's timeout
    ///
    /// The child is killed if the timeout elapses or the future is dropped.
    pub async fn run(&self, args: &[&str]) -> Result<RcloneOutput, RunError> {
        tracing::debug!("Running: {} {}", self.binary, args.join(" "));

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RunError::Timeout(self.timeout))??;

        Ok(RcloneOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// List entries at `path` of a remote, using an explicit config file
    pub async fn lsf(&self, target: &str, config_file: &str) -> Result<RcloneOutput, RunError> {
        self.run(&["lsf", target, "--config", config_file]).await
    }

    /// Names of the remotes in the user's own rclone config
    pub async fn list_remotes(&self) -> Result<Vec<String>, RunError> {
        let output = self.run(&["listremotes"]).await?;
        Ok(output
            .stdout
            .lines()
            .filter_map(|line| line.trim().strip_suffix(':'))
            .map(str::to_string)
            .collect())
    }

    /// The user's rclone config, parsed from `rclone config dump`
    ///
    /// Maps remote name to its key/value section; the `type` key identifies
    /// the backend.
    pub async fn config_dump(
        &self,
    ) -> Result<BTreeMap<String, BTreeMap<String, String>>, RunError> {
        let output = self.run(&["config", "dump"]).await?;
        if !output.success() {
            return Err(RunError::Failed(output.stderr.trim().to_string()));
        }

        let raw: BTreeMap<String, BTreeMap<String, serde_json::Value>> =
            serde_json::from_str(&output.stdout)?;

        Ok(raw
            .into_iter()
            .map(|(name, section)| {
                let section = section
                    .into_iter()
                    .map(|(key, value)| {
                        let value = match value.as_str() {
                            Some(s) => s.to_string(),
                            None => value.to_string(),
                        };
                        (key, value)
                    })
                    .collect();
                (name, section)
            })
            .collect())
    }

    /// First line of `rclone version`, or an error if the binary is missing
    pub async fn version(&self) -> Result<String, RunError> {
        let output = self.run(&["version"]).await?;
        Ok(output
            .stdout
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }
}
