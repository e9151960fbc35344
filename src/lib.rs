//! rcmate - a headless companion for rclone
//!
//! Wraps rclone with a plugin model for remote types: each remote kind
//! declares its configuration fields, validates user input, renders the
//! config section rclone expects, and can probe the real backend without
//! touching the user's own rclone config.

pub mod cli;
pub mod config;
pub mod plugins;
pub mod rclone;

pub use config::{Config, ConfigLoader};
pub use plugins::{PluginOutcome, PluginRegistry, RemoteConfig, RemotePlugin};
pub use rclone::Rclone;
