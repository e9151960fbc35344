//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for
//! serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// rclone invocation settings
    #[serde(default)]
    pub rclone: RcloneConfig,

    /// Plugin loading settings
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// Mount settings
    #[serde(default)]
    pub mount: MountConfig,
}

/// rclone invocation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RcloneConfig {
    /// Binary name or absolute path
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Hard bound on a connection test, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

/// Plugin loading settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PluginsConfig {
    /// Directory holding remote-type manifests; empty means the
    /// `plugins/` directory under the config dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Mount settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MountConfig {
    /// Directory mountpoints are created under; empty means ~/mnt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Value passed as --vfs-cache-mode
    #[serde(default = "default_vfs_cache_mode")]
    pub vfs_cache_mode: String,
}

// Default value functions
fn default_binary() -> String {
    "rclone".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    30
}

fn default_vfs_cache_mode() -> String {
    "writes".to_string()
}

impl Default for RcloneConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            vfs_cache_mode: default_vfs_cache_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.rclone.binary, "rclone");
        assert_eq!(config.rclone.probe_timeout_secs, 30);
        assert_eq!(config.mount.vfs_cache_mode, "writes");
        assert!(config.plugins.dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("probeTimeoutSecs"));
        assert!(yaml.contains("vfsCacheMode"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
rclone:
  binary: /opt/rclone/rclone
  probeTimeoutSecs: 10
mount:
  baseDir: /srv/mounts
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rclone.binary, "/opt/rclone/rclone");
        assert_eq!(config.rclone.probe_timeout_secs, 10);
        assert_eq!(config.mount.base_dir, Some(PathBuf::from("/srv/mounts")));
        assert_eq!(config.mount.vfs_cache_mode, "writes");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
