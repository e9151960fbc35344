//! Configuration system for rcmate
//!
//! A single YAML config file with sensible defaults, plus dotted-key access
//! for the `config get`/`config set` commands.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, MountConfig, PluginsConfig, RcloneConfig};

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "rclone.binary" => Ok(config.rclone.binary.clone()),
        "rclone.probeTimeoutSecs" => Ok(config.rclone.probe_timeout_secs.to_string()),
        "plugins.dir" => Ok(config
            .plugins
            .dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "mount.baseDir" => Ok(config
            .mount
            .base_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "mount.vfsCacheMode" => Ok(config.mount.vfs_cache_mode.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "rclone.binary" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("rclone.binary cannot be empty"));
            }
            config.rclone.binary = value.to_string();
        }
        "rclone.probeTimeoutSecs" => {
            let secs: u64 = value
                .parse()
                .context("rclone.probeTimeoutSecs must be a number")?;
            if secs == 0 {
                return Err(anyhow::anyhow!("rclone.probeTimeoutSecs must be at least 1"));
            }
            config.rclone.probe_timeout_secs = secs;
        }
        "plugins.dir" => {
            config.plugins.dir = if value.is_empty() {
                None
            } else {
                Some(value.into())
            };
        }
        "mount.baseDir" => {
            config.mount.base_dir = if value.is_empty() {
                None
            } else {
                Some(value.into())
            };
        }
        "mount.vfsCacheMode" => {
            config.mount.vfs_cache_mode = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Keys accepted by `get_config_value`/`set_config_value`
pub const CONFIG_KEYS: &[&str] = &[
    "rclone.binary",
    "rclone.probeTimeoutSecs",
    "plugins.dir",
    "mount.baseDir",
    "mount.vfsCacheMode",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        for key in CONFIG_KEYS {
            assert!(get_config_value(&config, key).is_ok(), "key {key}");
        }
    }

    #[test]
    fn test_get_unknown_key() {
        let config = Config::default();
        assert!(get_config_value(&config, "ui.skin").is_err());
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let mut config = Config::default();
        set_config_value(&mut config, "rclone.probeTimeoutSecs", "10").unwrap();
        assert_eq!(
            get_config_value(&config, "rclone.probeTimeoutSecs").unwrap(),
            "10"
        );
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "rclone.probeTimeoutSecs", "soon").is_err());
        assert!(set_config_value(&mut config, "rclone.probeTimeoutSecs", "0").is_err());
        assert!(set_config_value(&mut config, "rclone.binary", "  ").is_err());
    }

    #[test]
    fn test_empty_value_clears_optional_paths() {
        let mut config = Config::default();
        set_config_value(&mut config, "mount.baseDir", "/srv/mounts").unwrap();
        assert!(config.mount.base_dir.is_some());

        set_config_value(&mut config, "mount.baseDir", "").unwrap();
        assert!(config.mount.base_dir.is_none());
    }
}
