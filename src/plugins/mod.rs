//! Plugin system for rcmate
//!
//! Remote types are plugins: a fixed capability set (name, field schema,
//! validation, connection testing, config formatting) implemented by
//! compiled-in built-ins and by declarative YAML manifests loaded from the
//! plugins directory.

pub mod builtin;
pub mod field;
pub mod interface;
pub mod manifest;
pub mod outcome;
pub mod registry;
pub mod validator;

pub use field::{FieldType, PluginField};
pub use interface::RemotePlugin;
pub use manifest::{ManifestPlugin, RemoteManifest};
pub use outcome::{PluginOutcome, RemoteConfig};
pub use registry::{LoadWarning, PluginRegistry, RegistryLoad};
pub use validator::{ManifestValidator, validate_config};

/// Plugin errors
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Invalid plugin manifest: {0}")]
    InvalidManifest(String),

    #[error("Plugin conflict: {0}")]
    Conflict(String),

    #[error("Plugin not found: {0}")]
    NotFound(String),

    #[error("Failed to load plugin: {0}")]
    LoadError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;
