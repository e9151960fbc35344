//! Handlers for the remote-facing subcommands

use crate::config::{Config, ConfigLoader};
use crate::plugins::{PluginRegistry, RemoteConfig, validate_config};
use crate::rclone::{Rclone, mount, probe};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Parse `key=value` arguments into a remote config
pub fn parse_pairs(pairs: &[String]) -> Result<RemoteConfig> {
    let mut config = RemoteConfig::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{pair}'"))?;
        config.insert(key.trim().to_string(), value.to_string());
    }
    Ok(config)
}

/// Load the registry, printing any load warnings to stderr
fn load_registry(config: &Config) -> PluginRegistry {
    let load = PluginRegistry::load(&ConfigLoader::plugins_dir(config));
    for warning in &load.warnings {
        eprintln!("warning: {}: {}", warning.source, warning.reason);
    }
    load.registry
}

/// Look up a plugin or fail with the list of known names
fn find_plugin(
    registry: &PluginRegistry,
    name: &str,
) -> Result<Arc<dyn crate::plugins::RemotePlugin>> {
    registry.get(name).with_context(|| {
        format!(
            "Unknown plugin '{}'. Available: {}",
            name,
            registry.names().join(", ")
        )
    })
}

/// `validate` - run a plugin's validator against key=value input
pub async fn handle_validate_command(config: &Config, plugin: &str, pairs: &[String]) -> Result<()> {
    let registry = load_registry(config);
    let plugin = find_plugin(&registry, plugin)?;
    let remote_config = parse_pairs(pairs)?;

    let outcome = validate_config(plugin.as_ref(), &remote_config);
    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the probe handle, letting a `--timeout` argument win over the
/// configured bound
fn probe_handle(config: &Config, timeout_secs: Option<u64>) -> Rclone {
    let rclone = Rclone::from_config(config);
    match timeout_secs {
        Some(secs) => rclone.with_timeout(std::time::Duration::from_secs(secs)),
        None => rclone,
    }
}

/// `test` - validate, then probe the real backend
pub async fn handle_test_command(
    config: &Config,
    plugin: &str,
    pairs: &[String],
    timeout_secs: Option<u64>,
) -> Result<()> {
    let registry = load_registry(config);
    let plugin = find_plugin(&registry, plugin)?;
    let remote_config = parse_pairs(pairs)?;

    let outcome = validate_config(plugin.as_ref(), &remote_config);
    if !outcome.success {
        println!("{}", outcome.message);
        std::process::exit(1);
    }

    let rclone = probe_handle(config, timeout_secs);
    let outcome = plugin.test_connection(&remote_config, &rclone).await;
    println!("{}", outcome.message);
    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

/// `doctor` - report whether the environment is usable
pub async fn handle_doctor_command(config: &Config) -> Result<()> {
    let rclone = Rclone::from_config(config);
    match rclone.version().await {
        Ok(version) => println!("rclone: {} ({})", version, rclone.binary()),
        Err(e) => {
            eprintln!("rclone: not working: {e}");
            std::process::exit(1);
        }
    }

    let plugins_dir = ConfigLoader::plugins_dir(config);
    let load = PluginRegistry::load(&plugins_dir);
    println!(
        "plugins: {} registered ({})",
        load.registry.len(),
        plugins_dir.display()
    );
    for warning in &load.warnings {
        println!("  warning: {}: {}", warning.source, warning.reason);
    }

    Ok(())
}

/// `format` - print the config section a plugin would write
pub async fn handle_format_command(
    config: &Config,
    plugin: &str,
    section: &str,
    pairs: &[String],
) -> Result<()> {
    let registry = load_registry(config);
    let plugin = find_plugin(&registry, plugin)?;
    let remote_config = parse_pairs(pairs)?;

    let block = plugin.config_block(&remote_config);
    print!("{}", probe::render_section(section, &block));
    Ok(())
}

/// `remotes` - list the remotes in the user's own rclone config
pub async fn handle_remotes_command(config: &Config) -> Result<()> {
    let rclone = Rclone::from_config(config);

    // `config dump` gives us the backend types as well; fall back to the
    // plain listing on rclone versions where dump is unavailable.
    let remotes: Vec<(String, String)> = match rclone.config_dump().await {
        Ok(dump) => dump
            .into_iter()
            .map(|(name, section)| {
                let remote_type = section.get("type").cloned().unwrap_or_default();
                (name, remote_type)
            })
            .collect(),
        Err(e) => {
            tracing::debug!("config dump failed ({}), falling back to listremotes", e);
            rclone
                .list_remotes()
                .await
                .context("Failed to list remotes")?
                .into_iter()
                .map(|name| (name, String::new()))
                .collect()
        }
    };

    if remotes.is_empty() {
        println!("No remotes configured");
        return Ok(());
    }

    for (remote, remote_type) in remotes {
        let mountpoint = mount::mount_dir(config.mount.base_dir.as_deref(), &remote)?;
        let mut line = remote.clone();
        if !remote_type.is_empty() {
            line.push_str(&format!("\t{remote_type}"));
        }
        if mount::is_mounted(&mountpoint).await {
            line.push_str(&format!("\tmounted at {}", mountpoint.display()));
        }
        println!("{line}");
    }
    Ok(())
}

/// `mount` - mount a remote at its mountpoint
pub async fn handle_mount_command(
    config: &Config,
    remote: &str,
    mountpoint: Option<PathBuf>,
) -> Result<()> {
    let rclone = Rclone::from_config(config);
    let mountpoint = match mountpoint {
        Some(path) => path,
        None => mount::mount_dir(config.mount.base_dir.as_deref(), remote)?,
    };

    mount::mount_remote(&rclone, remote, &mountpoint, &config.mount.vfs_cache_mode).await?;
    println!("Mounted {remote}: at {}", mountpoint.display());
    Ok(())
}

/// `unmount` - release a mounted remote
pub async fn handle_unmount_command(
    config: &Config,
    remote: &str,
    mountpoint: Option<PathBuf>,
) -> Result<()> {
    let mountpoint = match mountpoint {
        Some(path) => path,
        None => mount::mount_dir(config.mount.base_dir.as_deref(), remote)?,
    };

    mount::unmount_remote(&mountpoint).await?;
    println!("Unmounted {}", mountpoint.display());
    Ok(())
}
