//! Connection probing
//!
//! A probe writes a candidate config block to a single-use temporary file
//! under a fixed sentinel remote name, then asks rclone to list the remote's
//! root. The user's own rclone config is never touched. The temporary file is
//! removed when the probe returns, whatever the outcome.

use super::{Rclone, RunError};
use crate::plugins::PluginOutcome;
use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// Section name used for every probe; never collides with real remotes
/// because the config file is private to the probe
pub const SENTINEL_REMOTE: &str = "rcmate-probe";

/// Render one INI section in rclone config syntax
///
/// `type` always comes first; remaining keys follow in sorted order and empty
/// values are skipped so rclone applies its own defaults.
pub fn render_section(name: &str, block: &BTreeMap<String, String>) -> String {
    let mut out = format!("[{name}]\n");
    if let Some(remote_type) = block.get("type") {
        out.push_str(&format!("type = {remote_type}\n"));
    }
    for (key, value) in block {
        if key == "type" || value.is_empty() {
            continue;
        }
        out.push_str(&format!("{key} = {value}\n"));
    }
    out
}

/// Probe a config block against the real backend
///
/// Outcomes are never errors: spawn failures, timeouts, and non-zero exits all
/// map to failing `PluginOutcome`s with messages a user can act on.
pub async fn probe_remote(rclone: &Rclone, block: &BTreeMap<String, String>) -> PluginOutcome {
    let conf = match write_probe_config(rclone, block) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("Failed to write probe config: {}", e);
            return PluginOutcome::fail(format!("Could not prepare test configuration: {e}"));
        }
    };

    let target = format!("{SENTINEL_REMOTE}:/");
    let result = rclone.lsf(&target, &conf.path().to_string_lossy()).await;

    // `conf` is still alive here; the file is unlinked when it drops below.
    match result {
        Ok(output) if output.success() => PluginOutcome::ok("Connection successful"),
        Ok(output) => {
            let detail = if output.stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                output.stderr.trim().to_string()
            };
            PluginOutcome::fail(format!("Connection failed: {detail}"))
        }
        Err(RunError::Timeout(duration)) => PluginOutcome::fail(format!(
            "Connection test timed out after {} seconds",
            duration.as_secs()
        )),
        Err(e) => PluginOutcome::fail(format!("Connection test could not run: {e}")),
    }
}

/// Write the block to a fresh temp file as `[rcmate-probe]`
fn write_probe_config(
    rclone: &Rclone,
    block: &BTreeMap<String, String>,
) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("rcmate-probe-").suffix(".conf");

    let mut file = match rclone.scratch_dir() {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };

    file.write_all(render_section(SENTINEL_REMOTE, block).as_bytes())?;
    file.flush()?;
    Ok(file)
}
