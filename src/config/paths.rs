//! Locations for configuration and data files
//!
//! `RCMATE_CONFIG_DIR` and `RCMATE_DATA_DIR` override everything, which is
//! how the test suite points rcmate at scratch directories. Otherwise paths
//! follow the platform conventions (XDG on Unix, Known Folders on Windows).

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "rcmate")
}

fn env_or(var: &str, fallback: impl FnOnce() -> PathBuf) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| fallback())
}

/// Directory for the config file and plugin manifests
pub fn config_dir() -> PathBuf {
    env_or("RCMATE_CONFIG_DIR", || {
        project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".rcmate"))
    })
}

/// Directory for mutable state
pub fn data_dir() -> PathBuf {
    env_or("RCMATE_DATA_DIR", || {
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".rcmate"))
    })
}

pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

pub fn plugins_dir() -> PathBuf {
    config_dir().join("plugins")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
