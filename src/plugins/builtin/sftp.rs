//! SFTP remote plugin

use crate::plugins::field::{FieldType, PluginField};
use crate::plugins::interface::RemotePlugin;
use crate::plugins::outcome::{PluginOutcome, RemoteConfig, supplied};
use async_trait::async_trait;

/// SSH File Transfer Protocol remotes
pub struct Sftp;

#[async_trait]
impl RemotePlugin for Sftp {
    fn name(&self) -> &str {
        "SFTP"
    }

    fn remote_type(&self) -> &str {
        "sftp"
    }

    fn description(&self) -> &str {
        "SSH File Transfer Protocol - secure file transfer over SSH"
    }

    fn notes(&self) -> &str {
        "Key-based authentication is preferred over passwords. Leave both \
         password and key file empty to use the SSH agent. Private keys \
         typically need 600 permissions."
    }

    fn fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("host", "Host", FieldType::Text)
                .with_description("Host to connect to (e.g. sftp.example.com)"),
            PluginField::new("user", "Username", FieldType::Text)
                .with_description("SSH username"),
            PluginField::new("port", "Port", FieldType::Int)
                .optional()
                .with_default("22")
                .with_description("SSH port number"),
            PluginField::new("pass", "Password", FieldType::Password)
                .optional()
                .with_description("SSH password (leave empty for key or agent authentication)"),
        ]
    }

    fn advanced_fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("key_file", "Private key file", FieldType::File)
                .optional()
                .with_file_filter("*.pem *.key")
                .with_description("Path to an SSH private key for key-based authentication"),
            PluginField::new("disable_hashcheck", "Disable hash check", FieldType::Bool)
                .optional()
                .with_description("Set when the server does not support checksums"),
        ]
    }

    fn validate(&self, config: &RemoteConfig) -> PluginOutcome {
        let mut reasons = Vec::new();

        if supplied(config, "host").is_none() {
            reasons.push("Host is required".to_string());
        }

        if supplied(config, "user").is_none() {
            reasons.push("Username is required".to_string());
        }

        if let Some(port) = supplied(config, "port") {
            match port.parse::<u32>() {
                Ok(n) if (1..=65535).contains(&n) => {}
                Ok(_) => reasons.push("Port must be between 1 and 65535".to_string()),
                Err(_) => reasons.push("Port must be a number".to_string()),
            }
        }

        if let Some(flag) = supplied(config, "disable_hashcheck") {
            if flag != "true" && flag != "false" {
                reasons.push("Disable hash check must be true or false".to_string());
            }
        }

        // Password and key file are each optional, and absent-both is fine:
        // rclone falls back to the SSH agent.

        if reasons.is_empty() {
            PluginOutcome::ok("Configuration appears valid")
        } else {
            PluginOutcome::fail(reasons.join("; "))
        }
    }
}
