//! S3-compatible remote plugin

use crate::plugins::field::{FieldType, PluginField};
use crate::plugins::interface::RemotePlugin;
use crate::plugins::outcome::{PluginOutcome, RemoteConfig, supplied};
use async_trait::async_trait;

const PROVIDERS: &[&str] = &[
    "AWS",
    "Ceph",
    "DigitalOcean",
    "Minio",
    "Wasabi",
    "Other",
];

/// Providers that always need an explicit endpoint
const ENDPOINT_REQUIRED: &[&str] = &["Ceph", "Minio", "Other"];

/// Amazon S3 and S3-compatible object stores
pub struct S3;

#[async_trait]
impl RemotePlugin for S3 {
    fn name(&self) -> &str {
        "S3"
    }

    fn remote_type(&self) -> &str {
        "s3"
    }

    fn description(&self) -> &str {
        "Amazon S3 and S3-compatible object storage (Minio, Ceph, Wasabi, ...)"
    }

    fn notes(&self) -> &str {
        "Credentials can come from the environment (IAM role, AWS_* variables) \
         by enabling env auth instead of supplying keys. Non-AWS providers \
         need their endpoint URL."
    }

    fn fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("provider", "Provider", FieldType::Choice)
                .optional()
                .with_default("AWS")
                .with_choices(PROVIDERS)
                .with_description("Which S3-compatible service this remote points at"),
            PluginField::new("access_key_id", "Access key ID", FieldType::Text)
                .optional()
                .with_description("Leave empty together with the secret to use env auth"),
            PluginField::new("secret_access_key", "Secret access key", FieldType::Password)
                .optional(),
            PluginField::new("region", "Region", FieldType::Text)
                .optional()
                .with_description("Region to connect to (e.g. us-east-1)"),
            PluginField::new("env_auth", "Use environment credentials", FieldType::Bool)
                .optional()
                .with_default("false")
                .with_description("Read credentials from the runtime environment"),
        ]
    }

    fn advanced_fields(&self) -> Vec<PluginField> {
        vec![
            PluginField::new("endpoint", "Endpoint", FieldType::Text)
                .optional()
                .with_description("Endpoint URL for non-AWS providers"),
            PluginField::new("storage_class", "Storage class", FieldType::Choice)
                .optional()
                .with_choices(&[
                    "STANDARD",
                    "REDUCED_REDUNDANCY",
                    "STANDARD_IA",
                    "ONEZONE_IA",
                    "GLACIER",
                    "DEEP_ARCHIVE",
                ]),
            PluginField::new("acl", "Canned ACL", FieldType::Text).optional(),
        ]
    }

    fn validate(&self, config: &RemoteConfig) -> PluginOutcome {
        let mut reasons = Vec::new();

        let provider = supplied(config, "provider").unwrap_or("AWS");
        if !PROVIDERS.contains(&provider) {
            reasons.push(format!(
                "Provider must be one of: {}",
                PROVIDERS.join(", ")
            ));
        }

        let env_auth = match supplied(config, "env_auth") {
            None | Some("false") => false,
            Some("true") => true,
            Some(_) => {
                reasons.push("Use environment credentials must be true or false".to_string());
                false
            }
        };

        // Either env auth, or both halves of the key pair.
        let key = supplied(config, "access_key_id");
        let secret = supplied(config, "secret_access_key");
        if !env_auth {
            match (key, secret) {
                (Some(_), Some(_)) => {}
                (None, None) => reasons.push(
                    "Supply both access key ID and secret access key, or enable env auth"
                        .to_string(),
                ),
                (Some(_), None) => {
                    reasons.push("Secret access key is required when an access key ID is set"
                        .to_string());
                }
                (None, Some(_)) => {
                    reasons.push("Access key ID is required when a secret access key is set"
                        .to_string());
                }
            }
        }

        if ENDPOINT_REQUIRED.contains(&provider) && supplied(config, "endpoint").is_none() {
            reasons.push(format!("Endpoint is required for provider {provider}"));
        }

        if reasons.is_empty() {
            PluginOutcome::ok("Configuration appears valid")
        } else {
            PluginOutcome::fail(reasons.join("; "))
        }
    }
}
