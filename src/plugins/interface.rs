//! Remote plugin capability set
//!
//! Every remote type, built-in or manifest-backed, implements `RemotePlugin`.
//! Conformance is checked at compile time; there is no runtime method probing.

use super::field::PluginField;
use super::outcome::{PluginOutcome, RemoteConfig};
use crate::rclone::{Rclone, probe};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// The contract a remote type implements
#[async_trait]
pub trait RemotePlugin: Send + Sync {
    /// Display name (e.g. "SFTP"), unique across the registry
    fn name(&self) -> &str;

    /// The fixed `type` identifier rclone uses for this remote kind
    fn remote_type(&self) -> &str;

    /// Primary configuration fields, in form layout order
    fn fields(&self) -> Vec<PluginField>;

    /// Additional fields rendered behind an "advanced" toggle
    fn advanced_fields(&self) -> Vec<PluginField> {
        Vec::new()
    }

    /// One-line description of the remote type
    fn description(&self) -> &str {
        ""
    }

    /// Special notes or warnings shown alongside the form
    fn notes(&self) -> &str {
        ""
    }

    /// Validate raw user input
    ///
    /// The plugin owns its full validation policy, including cross-field
    /// constraints (e.g. "either password or key file"). Multiple reasons are
    /// joined into one message, never truncated.
    fn validate(&self, config: &RemoteConfig) -> PluginOutcome;

    /// Produce the `key = value` block written under a config section
    ///
    /// Always contains a `type` key with the plugin's remote type. Fields with
    /// empty values are omitted entirely so rclone falls back to its own
    /// defaults. Pure function of the input: no counters or timestamps.
    fn config_block(&self, config: &RemoteConfig) -> BTreeMap<String, String> {
        let mut block = BTreeMap::new();
        block.insert("type".to_string(), self.remote_type().to_string());
        for (key, value) in config {
            if key != "type" && !value.is_empty() {
                block.insert(key.clone(), value.clone());
            }
        }
        block
    }

    /// Test the configuration against the real backend
    ///
    /// Writes the config block to a single-use temporary file and asks rclone
    /// to list the sentinel remote's root, bounded by the handle's timeout.
    /// The temporary file never outlives the call.
    async fn test_connection(&self, config: &RemoteConfig, rclone: &Rclone) -> PluginOutcome {
        let block = self.config_block(config);
        probe::probe_remote(rclone, &block).await
    }
}
