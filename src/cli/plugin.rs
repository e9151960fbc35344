//! Plugin management subcommands

use crate::config::{Config, ConfigLoader};
use crate::plugins::{PluginRegistry, RemoteManifest};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;

/// Plugin management subcommands
#[derive(Subcommand, Debug)]
pub enum PluginSubcommand {
    /// List registered plugins
    List,
    /// Show a plugin's description and notes
    Info {
        /// Plugin display name
        name: String,
    },
    /// Show a plugin's configuration fields
    Fields {
        /// Plugin display name
        name: String,
        /// Include advanced fields
        #[arg(long)]
        advanced: bool,
        /// Emit the field schema as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate a manifest file without registering it
    Validate {
        /// Path to a manifest YAML file
        path: PathBuf,
    },
    /// Write a starter manifest to a file
    Init {
        /// Destination path for the new manifest
        path: PathBuf,
    },
}

/// Handle plugin subcommands
pub async fn handle_plugin_command(config: &Config, cmd: PluginSubcommand) -> Result<()> {
    match cmd {
        PluginSubcommand::List => {
            let load = PluginRegistry::load(&ConfigLoader::plugins_dir(config));
            for plugin in load.registry.all() {
                if plugin.description().is_empty() {
                    println!("{}", plugin.name());
                } else {
                    println!("{}\t{}", plugin.name(), plugin.description());
                }
            }
            for warning in &load.warnings {
                eprintln!("warning: {}: {}", warning.source, warning.reason);
            }
        }
        PluginSubcommand::Info { name } => {
            let load = PluginRegistry::load(&ConfigLoader::plugins_dir(config));
            let plugin = load
                .registry
                .get(&name)
                .with_context(|| format!("Unknown plugin '{name}'"))?;

            println!("{} (type = {})", plugin.name(), plugin.remote_type());
            if !plugin.description().is_empty() {
                println!("{}", plugin.description());
            }
            if !plugin.notes().is_empty() {
                println!("\n{}", plugin.notes());
            }
        }
        PluginSubcommand::Fields {
            name,
            advanced,
            json,
        } => {
            let load = PluginRegistry::load(&ConfigLoader::plugins_dir(config));
            let fields = load.registry.fields_for(&name)?;
            let advanced_fields = if advanced {
                load.registry.advanced_fields_for(&name)?
            } else {
                Vec::new()
            };

            if json {
                println!("{}", fields_json(&fields, advanced.then_some(&advanced_fields))?);
            } else {
                print_fields(&fields);
                if !advanced_fields.is_empty() {
                    println!("\nAdvanced:");
                    print_fields(&advanced_fields);
                }
            }
        }
        PluginSubcommand::Validate { path } => match PluginRegistry::load_manifest(&path) {
            Ok(manifest) => {
                println!(
                    "{} is a valid manifest for '{}' (type = {})",
                    path.display(),
                    manifest.name,
                    manifest.remote_type
                );
            }
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        PluginSubcommand::Init { path } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }

            let yaml = serde_yaml::to_string(&starter_manifest())
                .context("Failed to serialize starter manifest")?;
            std::fs::write(&path, yaml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote starter manifest to {}", path.display());
        }
    }

    Ok(())
}

/// Field schema as a JSON document; advanced fields appear under their own
/// key only when requested
fn fields_json(
    fields: &[crate::plugins::PluginField],
    advanced: Option<&Vec<crate::plugins::PluginField>>,
) -> Result<String> {
    let doc = match advanced {
        Some(advanced_fields) => serde_json::json!({
            "fields": fields,
            "advanced_fields": advanced_fields,
        }),
        None => serde_json::json!({ "fields": fields }),
    };
    serde_json::to_string_pretty(&doc).context("Failed to serialize field schema")
}

fn print_fields(fields: &[crate::plugins::PluginField]) {
    for field in fields {
        let required = if field.required { "required" } else { "optional" };
        let mut line = format!("{}\t{}\t{}", field.name, field.field_type.as_str(), required);
        if let Some(default) = &field.default {
            line.push_str(&format!("\tdefault = {default}"));
        }
        println!("{line}");
        if !field.description.is_empty() {
            println!("    {}", field.description);
        }
    }
}

fn starter_manifest() -> RemoteManifest {
    use crate::plugins::{FieldType, PluginField};

    RemoteManifest {
        name: "My Remote".to_string(),
        remote_type: "ftp".to_string(),
        enabled: true,
        description: "Describe this remote type".to_string(),
        notes: String::new(),
        fields: vec![
            PluginField::new("host", "Host", FieldType::Text),
            PluginField::new("user", "Username", FieldType::Text).optional(),
            PluginField::new("pass", "Password", FieldType::Password).optional(),
        ],
        advanced_fields: Vec::new(),
    }
}
