//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod config;
mod logging;
mod plugin;

pub use commands::{
    handle_doctor_command, handle_format_command, handle_mount_command, handle_remotes_command,
    handle_test_command, handle_unmount_command, handle_validate_command, parse_pairs,
};
pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use plugin::{PluginSubcommand, handle_plugin_command};
