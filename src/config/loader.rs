//! Configuration loading
//!
//! Loads the root config file, fills in defaults, and applies environment
//! variable overrides.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let mut config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            Self::load_defaults()
        };

        config = Self::apply_env_overrides(config);
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Validate the root config file, if present
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            let config = Self::load_file(&root_path)?;

            if config.rclone.probe_timeout_secs == 0 {
                anyhow::bail!("rclone.probeTimeoutSecs must be at least 1");
            }
            if config.rclone.binary.trim().is_empty() {
                anyhow::bail!("rclone.binary cannot be empty");
            }
        }

        Ok(())
    }

    /// The effective plugin manifests directory
    pub fn plugins_dir(config: &Config) -> PathBuf {
        config
            .plugins
            .dir
            .clone()
            .unwrap_or_else(paths::plugins_dir)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(binary) = std::env::var("RCMATE_RCLONE_BINARY") {
            config.rclone.binary = binary;
        }

        if let Ok(secs) = std::env::var("RCMATE_PROBE_TIMEOUT_SECS") {
            if let Ok(val) = secs.parse::<u64>() {
                config.rclone.probe_timeout_secs = val;
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}
