//! WebDAV remote plugin

use crate::plugins::field::{FieldType, PluginField};
use crate::plugins::interface::RemotePlugin;
use crate::plugins::outcome::{PluginOutcome, RemoteConfig, supplied};
use async_trait::async_trait;

const VENDORS: &[&str] = &["nextcloud", "owncloud", "sharepoint", "other"];

/// WebDAV servers (Nextcloud, ownCloud, SharePoint, generic)
pub struct Webdav;

#[async_trait]
impl RemotePlugin for Webdav {
    fn name(&self) -> &str {
        "WebDAV"
    }

    fn remote_type(&self) -> &str {
        "webdav"
    }

    fn description(&self) -> &str {
        "WebDAV servers, including Nextcloud and ownCloud"
    }

    fn notes(&self) -> &str {
        "Nextcloud and ownCloud expose WebDAV under /remote.php/dav/files/<user>. \
         Use an app password rather than the account password where supported."
    }

    fn fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("url", "URL", FieldType::Text)
                .with_description("URL of the WebDAV endpoint (https://...)"),
            PluginField::new("vendor", "Vendor", FieldType::Choice)
                .optional()
                .with_default("other")
                .with_choices(VENDORS)
                .with_description("Which server this is, so quirks can be handled"),
            PluginField::new("user", "Username", FieldType::Text).optional(),
            PluginField::new("pass", "Password", FieldType::Password).optional(),
        ]
    }

    fn advanced_fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("bearer_token", "Bearer token", FieldType::Password)
                .optional()
                .with_description("OAuth bearer token, instead of user/password"),
        ]
    }

    fn validate(&self, config: &RemoteConfig) -> PluginOutcome {
        let mut reasons = Vec::new();

        match supplied(config, "url") {
            None => reasons.push("URL is required".to_string()),
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                reasons.push("URL must start with http:// or https://".to_string());
            }
            Some(_) => {}
        }

        if let Some(vendor) = supplied(config, "vendor") {
            if !VENDORS.contains(&vendor) {
                reasons.push(format!("Vendor must be one of: {}", VENDORS.join(", ")));
            }
        }

        // A bearer token stands in for user/password; sending both confuses
        // servers that check Authorization headers strictly.
        if supplied(config, "bearer_token").is_some() && supplied(config, "pass").is_some() {
            reasons.push("Supply either a password or a bearer token, not both".to_string());
        }

        if reasons.is_empty() {
            PluginOutcome::ok("Configuration appears valid")
        } else {
            PluginOutcome::fail(reasons.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> RemoteConfig {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_url_is_required() {
        let outcome = Webdav.validate(&config(&[("user", "alice")]));
        assert!(!outcome.success);
        assert!(outcome.message.contains("URL is required"));
    }

    #[test]
    fn test_url_scheme_checked() {
        let outcome = Webdav.validate(&config(&[("url", "ftp://dav.example.com")]));
        assert!(!outcome.success);
        assert!(outcome.message.contains("http://"));
    }

    #[test]
    fn test_valid_nextcloud_config() {
        let outcome = Webdav.validate(&config(&[
            ("url", "https://cloud.example.com/remote.php/dav/files/alice"),
            ("vendor", "nextcloud"),
            ("user", "alice"),
            ("pass", "app-password"),
        ]));
        assert!(outcome.success, "{}", outcome.message);
    }

    #[test]
    fn test_password_and_bearer_token_conflict() {
        let outcome = Webdav.validate(&config(&[
            ("url", "https://dav.example.com"),
            ("pass", "secret"),
            ("bearer_token", "token"),
        ]));
        assert!(!outcome.success);
        assert!(outcome.message.contains("not both"));
    }

    #[test]
    fn test_unknown_vendor() {
        let outcome = Webdav.validate(&config(&[
            ("url", "https://dav.example.com"),
            ("vendor", "dropbox"),
        ]));
        assert!(!outcome.success);
        assert!(outcome.message.contains("Vendor must be one of"));
    }
}
