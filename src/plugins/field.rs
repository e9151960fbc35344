//! Field schema descriptors
//!
//! A `PluginField` describes one configuration input a remote type needs.
//! Declaration order is significant: front-ends render fields top to bottom
//! in the order a plugin returns them.

use serde::{Deserialize, Serialize};

/// Kind of input a configuration field accepts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Plain text (default)
    #[default]
    Text,

    /// Secret text, masked in front-ends
    Password,

    /// Path to a local file
    File,

    /// One value out of a fixed list
    Choice,

    /// true / false
    Bool,

    /// Whole number
    Int,

    /// Decimal number
    Float,
}

impl FieldType {
    /// String representation, matching the serde format (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Password => "password",
            FieldType::File => "file",
            FieldType::Choice => "choice",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes one configuration input for a remote type
///
/// Immutable once constructed; built-ins construct these in code, manifest
/// plugins deserialize them from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginField {
    /// Internal field name, unique within a plugin's field set.
    /// This is the key written to the rclone config block.
    pub name: String,

    /// User-facing label
    pub label: String,

    /// Input kind
    #[serde(default)]
    pub field_type: FieldType,

    /// Whether a value must be supplied
    #[serde(default = "default_required")]
    pub required: bool,

    /// Default value, shown to the user and assumed by rclone when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Optional help text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Allowed values, only meaningful for choice fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    /// Space-separated glob patterns for file fields (e.g. "*.pem *.key")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_filter: Option<String>,
}

fn default_required() -> bool {
    true
}

impl PluginField {
    /// Create a required field with no extras
    pub fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required: true,
            default: None,
            description: String::new(),
            choices: Vec::new(),
            file_filter: None,
        }
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_file_filter(mut self, filter: &str) -> Self {
        self.file_filter = Some(filter.to_string());
        self
    }
}
