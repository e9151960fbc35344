//! Plugin validation boundaries
//!
//! Two concerns live here: sanity-checking remote-type manifests before they
//! are registered, and guarding the registry's callers from plugin validators
//! that misbehave at runtime.

use super::field::{FieldType, PluginField};
use super::interface::RemotePlugin;
use super::manifest::RemoteManifest;
use super::outcome::{PluginOutcome, RemoteConfig};
use super::{PluginError, PluginResult};
use std::collections::HashSet;

/// Run a plugin's validator, converting panics into failing outcomes
///
/// One broken plugin must never take the editor down; the panic text becomes
/// the failure message.
pub fn validate_config(plugin: &dyn RemotePlugin, config: &RemoteConfig) -> PluginOutcome {
    let result =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| plugin.validate(config)));

    match result {
        Ok(outcome) => outcome,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!("Validator for plugin '{}' panicked: {}", plugin.name(), reason);
            PluginOutcome::fail(format!(
                "Plugin '{}' failed while validating: {}",
                plugin.name(),
                reason
            ))
        }
    }
}

/// Remote-type manifest validator
pub struct ManifestValidator;

impl ManifestValidator {
    /// Validate a manifest before registration
    pub fn validate(manifest: &RemoteManifest) -> PluginResult<()> {
        Self::validate_name(&manifest.name)?;
        Self::validate_remote_type(&manifest.remote_type)?;
        Self::validate_fields(manifest)?;
        Ok(())
    }

    /// Validate the display name
    fn validate_name(name: &str) -> PluginResult<()> {
        if name.is_empty() {
            return Err(PluginError::ValidationError(
                "Plugin name cannot be empty".to_string(),
            ));
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == ' ')
        {
            return Err(PluginError::ValidationError(format!(
                "Plugin name '{}' contains invalid characters. Use only alphanumeric, spaces, hyphens, and underscores",
                name
            )));
        }

        Ok(())
    }

    /// Validate the rclone type identifier
    fn validate_remote_type(remote_type: &str) -> PluginResult<()> {
        if remote_type.is_empty() {
            return Err(PluginError::ValidationError(
                "Remote type cannot be empty".to_string(),
            ));
        }

        // rclone type identifiers are lowercase tokens like "sftp" or "b2"
        if !remote_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(PluginError::ValidationError(format!(
                "Remote type '{}' is not a valid rclone type identifier",
                remote_type
            )));
        }

        Ok(())
    }

    /// Validate the declared field schema
    fn validate_fields(manifest: &RemoteManifest) -> PluginResult<()> {
        if manifest.fields.is_empty() {
            return Err(PluginError::ValidationError(
                "Plugin must declare at least one field".to_string(),
            ));
        }

        let mut seen_names = HashSet::new();
        for field in manifest.all_fields() {
            // Field names are unique across primary and advanced lists
            if !seen_names.insert(&field.name) {
                return Err(PluginError::ValidationError(format!(
                    "Duplicate field name '{}' in plugin",
                    field.name
                )));
            }

            Self::validate_field(field)?;
        }

        Ok(())
    }

    fn validate_field(field: &PluginField) -> PluginResult<()> {
        if field.name.is_empty() {
            return Err(PluginError::ValidationError(
                "Field name cannot be empty".to_string(),
            ));
        }

        if field.label.is_empty() {
            return Err(PluginError::ValidationError(format!(
                "Field '{}' has an empty label",
                field.name
            )));
        }

        match field.field_type {
            FieldType::Choice => {
                if field.choices.is_empty() {
                    return Err(PluginError::ValidationError(format!(
                        "Choice field '{}' declares no choices",
                        field.name
                    )));
                }
                if field.choices.iter().any(|c| c.is_empty()) {
                    return Err(PluginError::ValidationError(format!(
                        "Choice field '{}' has a blank choice",
                        field.name
                    )));
                }
            }
            _ => {
                if !field.choices.is_empty() {
                    return Err(PluginError::ValidationError(format!(
                        "Field '{}' declares choices but is not a choice field",
                        field.name
                    )));
                }
            }
        }

        if let Some(filter) = &field.file_filter {
            if field.field_type != FieldType::File {
                return Err(PluginError::ValidationError(format!(
                    "Field '{}' declares a file filter but is not a file field",
                    field.name
                )));
            }
            Self::validate_file_filter(&field.name, filter)?;
        }

        if let Some(default) = &field.default {
            Self::validate_default(field, default)?;
        }

        Ok(())
    }

    /// File filters are space-separated glob tokens like "*.pem *.key"
    fn validate_file_filter(field_name: &str, filter: &str) -> PluginResult<()> {
        let tokens: Vec<&str> = filter.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(PluginError::ValidationError(format!(
                "Field '{}' has an empty file filter",
                field_name
            )));
        }

        for token in tokens {
            if token.contains('/') || token.contains('\\') {
                return Err(PluginError::ValidationError(format!(
                    "Field '{}' file filter token '{}' may not contain path separators",
                    field_name, token
                )));
            }
        }

        Ok(())
    }

    /// Declared defaults must make sense for the field's type
    fn validate_default(field: &PluginField, default: &str) -> PluginResult<()> {
        let ok = match field.field_type {
            FieldType::Int => default.parse::<i64>().is_ok(),
            FieldType::Float => default.parse::<f64>().is_ok(),
            FieldType::Bool => default == "true" || default == "false",
            FieldType::Choice => field.choices.iter().any(|c| c == default),
            FieldType::Text | FieldType::Password | FieldType::File => true,
        };

        if !ok {
            return Err(PluginError::ValidationError(format!(
                "Field '{}' default '{}' is not a valid {} value",
                field.name,
                default,
                field.field_type.as_str()
            )));
        }

        Ok(())
    }
}
