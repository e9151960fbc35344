//! Operation outcomes
//!
//! Validation and connection testing never abort the process; every failure
//! path resolves to a `PluginOutcome` value.

use std::collections::BTreeMap;

/// Raw field-name to value mapping supplied by the user
pub type RemoteConfig = BTreeMap<String, String>;

/// Success/message pair returned by validation and connection testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOutcome {
    pub success: bool,
    pub message: String,
}

impl PluginOutcome {
    /// Successful outcome with a human-readable message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failing outcome with a human-readable reason
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Look up a key, treating empty strings the same as absent values
///
/// Blank fields are never written to config blocks or probe files, so
/// validation treats them as "not supplied" too.
pub fn supplied<'a>(config: &'a RemoteConfig, key: &str) -> Option<&'a str> {
    config.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
