//! Declarative remote-type manifests
//!
//! The extension mechanism: a YAML file per remote type declares its display
//! name, rclone `type` identifier, and field schema. Loaded manifests become
//! `ManifestPlugin`s that validate input generically from the declared schema.

use super::field::{FieldType, PluginField};
use super::interface::RemotePlugin;
use super::outcome::{PluginOutcome, RemoteConfig, supplied};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote-type manifest - root structure of a plugin YAML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteManifest {
    /// Display name (must be unique across the registry)
    pub name: String,

    /// rclone remote type identifier written as `type = ...`
    #[serde(rename = "type")]
    pub remote_type: String,

    /// Whether this plugin is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Optional one-line description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Optional notes or warnings shown alongside the form
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,

    /// Primary configuration fields, in form layout order
    #[serde(default)]
    pub fields: Vec<PluginField>,

    /// Fields rendered behind an "advanced" toggle
    #[serde(default)]
    pub advanced_fields: Vec<PluginField>,
}

fn default_enabled() -> bool {
    true
}

impl RemoteManifest {
    /// Iterate primary and advanced fields in declaration order
    pub fn all_fields(&self) -> impl Iterator<Item = &PluginField> {
        self.fields.iter().chain(self.advanced_fields.iter())
    }
}

/// A plugin backed by a declarative manifest
///
/// Validation policy is derived from the declared schema: required fields must
/// be supplied, typed fields must parse, choice fields must pick a declared
/// value. All reasons are joined into one message.
pub struct ManifestPlugin {
    manifest: RemoteManifest,
}

impl ManifestPlugin {
    pub fn new(manifest: RemoteManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &RemoteManifest {
        &self.manifest
    }

    fn check_field(field: &PluginField, config: &RemoteConfig, reasons: &mut Vec<String>) {
        let value = match supplied(config, &field.name) {
            Some(v) => v,
            None => {
                // A declared default satisfies a required field; rclone fills
                // it in when the key is omitted from the config block.
                if field.required && field.default.is_none() {
                    reasons.push(format!("{} is required", field.label));
                }
                return;
            }
        };

        match field.field_type {
            FieldType::Int => {
                if value.parse::<i64>().is_err() {
                    reasons.push(format!("{} must be a whole number", field.label));
                }
            }
            FieldType::Float => {
                if value.parse::<f64>().is_err() {
                    reasons.push(format!("{} must be a number", field.label));
                }
            }
            FieldType::Bool => {
                if value != "true" && value != "false" {
                    reasons.push(format!("{} must be true or false", field.label));
                }
            }
            FieldType::Choice => {
                if !field.choices.iter().any(|c| c == value) {
                    reasons.push(format!(
                        "{} must be one of: {}",
                        field.label,
                        field.choices.join(", ")
                    ));
                }
            }
            FieldType::Text | FieldType::Password | FieldType::File => {}
        }
    }
}

#[async_trait]
impl RemotePlugin for ManifestPlugin {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn remote_type(&self) -> &str {
        &self.manifest.remote_type
    }

    fn description(&self) -> &str {
        &self.manifest.description
    }

    fn notes(&self) -> &str {
        &self.manifest.notes
    }

    fn fields(&self) -> Vec<PluginField> {
        self.manifest.fields.clone()
    }

    fn advanced_fields(&self) -> Vec<PluginField> {
        self.manifest.advanced_fields.clone()
    }

    fn validate(&self, config: &RemoteConfig) -> PluginOutcome {
        let mut reasons = Vec::new();
        for field in self.manifest.all_fields() {
            Self::check_field(field, config, &mut reasons);
        }

        if reasons.is_empty() {
            PluginOutcome::ok("Configuration appears valid")
        } else {
            PluginOutcome::fail(reasons.join("; "))
        }
    }
}
