//! rcmate - a headless companion for rclone

use anyhow::Result;
use clap::{Parser, Subcommand};
use rcmate::cli;
use rcmate::config::ConfigLoader;
use std::path::PathBuf;

/// A headless companion for rclone: validate, test, format, and mount remotes
#[derive(Parser, Debug)]
#[command(name = "rcmate")]
#[command(about = "A headless companion for rclone", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Plugin management
    Plugins {
        #[command(subcommand)]
        subcommand: cli::PluginSubcommand,
    },
    /// Validate a remote configuration without touching the network
    Validate {
        /// Plugin display name (e.g. "SFTP")
        plugin: String,
        /// Configuration as key=value pairs
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Validate, then test a remote configuration against the real backend
    Test {
        /// Plugin display name (e.g. "SFTP")
        plugin: String,
        /// Configuration as key=value pairs
        #[arg(required = true)]
        pairs: Vec<String>,
        /// Override the probe timeout for this run, in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the rclone config section a configuration would produce
    Format {
        /// Plugin display name (e.g. "SFTP")
        plugin: String,
        /// Section name to render
        #[arg(long, default_value = "remote")]
        name: String,
        /// Configuration as key=value pairs
        pairs: Vec<String>,
    },
    /// List remotes from the user's rclone config
    Remotes,
    /// Check that rclone and the plugins directory are usable
    Doctor,
    /// Mount a remote as a local directory
    Mount {
        /// Remote name from the user's rclone config
        remote: String,
        /// Mountpoint (defaults to <mount.baseDir>/<remote>)
        #[arg(long)]
        at: Option<PathBuf>,
    },
    /// Unmount a mounted remote
    Unmount {
        /// Remote name from the user's rclone config
        remote: String,
        /// Mountpoint (defaults to <mount.baseDir>/<remote>)
        #[arg(long)]
        at: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: cli::ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);

    // Config subcommands manage the config file itself, so they skip loading.
    let command = match args.command {
        Command::Config { subcommand } => return cli::handle_config_command(subcommand).await,
        command => command,
    };

    let config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        ConfigLoader::load_defaults()
    });

    match command {
        Command::Plugins { subcommand } => cli::handle_plugin_command(&config, subcommand).await,
        Command::Validate { plugin, pairs } => {
            cli::handle_validate_command(&config, &plugin, &pairs).await
        }
        Command::Test {
            plugin,
            pairs,
            timeout,
        } => cli::handle_test_command(&config, &plugin, &pairs, timeout).await,
        Command::Format {
            plugin,
            name,
            pairs,
        } => cli::handle_format_command(&config, &plugin, &name, &pairs).await,
        Command::Remotes => cli::handle_remotes_command(&config).await,
        Command::Doctor => cli::handle_doctor_command(&config).await,
        Command::Mount { remote, at } => cli::handle_mount_command(&config, &remote, at).await,
        Command::Unmount { remote, at } => cli::handle_unmount_command(&config, &remote, at).await,
        Command::Config { .. } => unreachable!(),
    }
}
