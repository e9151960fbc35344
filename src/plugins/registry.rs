//! Plugin registry
//!
//! Built once at startup: built-in plugins first, then manifest files from the
//! plugins directory in lexicographic filename order. Loading never fails;
//! per-file problems become `LoadWarning`s so one malformed extension cannot
//! keep the application from starting.

use super::builtin::{S3, Sftp, Webdav};
use super::field::PluginField;
use super::interface::RemotePlugin;
use super::manifest::{ManifestPlugin, RemoteManifest};
use super::validator::ManifestValidator;
use super::{PluginError, PluginResult};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// A non-fatal problem encountered during a load cycle
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// Where the problem came from (file path or "built-in")
    pub source: String,
    pub reason: String,
}

/// Result of a registry load cycle
pub struct RegistryLoad {
    pub registry: PluginRegistry,
    pub warnings: Vec<LoadWarning>,
}

/// Plugin registry holds all registered remote plugins, indexed by display name
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Arc<dyn RemotePlugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            plugins: BTreeMap::new(),
        }
    }

    /// The plugins compiled into the binary
    pub fn builtins() -> Vec<Arc<dyn RemotePlugin>> {
        vec![Arc::new(Sftp), Arc::new(S3), Arc::new(Webdav)]
    }

    /// Build the registry: built-ins plus manifests from `plugins_dir`
    ///
    /// Collision policy is deterministic and first-wins: built-ins register
    /// before any manifest, and manifests register in lexicographic filename
    /// order; a later plugin reusing an existing display name is skipped with
    /// a warning.
    pub fn load(plugins_dir: &Path) -> RegistryLoad {
        let mut registry = Self::new();
        let mut warnings = Vec::new();

        for plugin in Self::builtins() {
            if let Err(e) = registry.register(plugin) {
                warnings.push(LoadWarning {
                    source: "built-in".to_string(),
                    reason: e.to_string(),
                });
            }
        }

        tracing::debug!("Loading plugin manifests from: {:?}", plugins_dir);

        if !plugins_dir.exists() {
            tracing::info!("Plugins directory does not exist: {:?}", plugins_dir);
            return RegistryLoad { registry, warnings };
        }

        for path in Self::manifest_paths(plugins_dir, &mut warnings) {
            match Self::load_manifest(&path) {
                Ok(manifest) => {
                    if !manifest.enabled {
                        tracing::info!("Plugin {} is disabled", manifest.name);
                        continue;
                    }

                    let name = manifest.name.clone();
                    match registry.register(Arc::new(ManifestPlugin::new(manifest))) {
                        Ok(()) => tracing::info!("Loaded plugin: {}", name),
                        Err(e) => {
                            tracing::warn!("Skipping plugin {:?}: {}", path, e);
                            warnings.push(LoadWarning {
                                source: path.display().to_string(),
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load plugin {:?}: {}", path, e);
                    warnings.push(LoadWarning {
                        source: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if warnings.is_empty() {
            tracing::info!(
                "Loaded {} plugin(s): {}",
                registry.len(),
                registry.names().join(", ")
            );
        } else {
            tracing::warn!(
                "Loaded {} plugin(s) with {} warning(s)",
                registry.len(),
                warnings.len()
            );
        }

        RegistryLoad { registry, warnings }
    }

    /// Candidate manifest files, sorted so discovery order is reproducible
    fn manifest_paths(plugins_dir: &Path, warnings: &mut Vec<LoadWarning>) -> Vec<std::path::PathBuf> {
        let entries = match std::fs::read_dir(plugins_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warnings.push(LoadWarning {
                    source: plugins_dir.display().to_string(),
                    reason: format!("Failed to read plugins directory: {e}"),
                });
                return Vec::new();
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && matches!(
                        path.extension().and_then(|e| e.to_str()),
                        Some("yaml") | Some("yml")
                    )
            })
            .collect();
        paths.sort();
        paths
    }

    /// Load and validate a single manifest file
    pub fn load_manifest(path: &Path) -> PluginResult<RemoteManifest> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PluginError::LoadError(format!("{}: {e}", path.display())))?;

        let manifest: RemoteManifest = serde_yaml::from_str(&content)
            .map_err(|e| PluginError::InvalidManifest(format!("{}: {e}", path.display())))?;

        ManifestValidator::validate(&manifest)?;

        Ok(manifest)
    }

    /// Register a plugin; rejects display-name collisions
    pub fn register(&mut self, plugin: Arc<dyn RemotePlugin>) -> PluginResult<()> {
        let name = plugin.name().to_string();
        if name.is_empty() {
            return Err(PluginError::ValidationError(
                "Plugin name cannot be empty".to_string(),
            ));
        }

        if self.plugins.contains_key(&name) {
            return Err(PluginError::Conflict(format!(
                "Display name '{name}' is already registered; first registration wins"
            )));
        }

        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Get a plugin by display name
    pub fn get(&self, name: &str) -> Option<Arc<dyn RemotePlugin>> {
        self.plugins.get(name).cloned()
    }

    /// All plugins, sorted by display name
    pub fn all(&self) -> Vec<Arc<dyn RemotePlugin>> {
        self.plugins.values().cloned().collect()
    }

    /// Registered display names, sorted
    pub fn names(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// Check if a plugin is registered
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// A plugin's primary fields, in declaration order
    pub fn fields_for(&self, name: &str) -> PluginResult<Vec<PluginField>> {
        self.plugins
            .get(name)
            .map(|p| p.fields())
            .ok_or_else(|| PluginError::NotFound(name.to_string()))
    }

    /// A plugin's advanced fields, in declaration order (may be empty)
    ///
    /// Primary and advanced lists are never merged here; the presentation
    /// layer decides whether advanced fields hide behind a toggle.
    pub fn advanced_fields_for(&self, name: &str) -> PluginResult<Vec<PluginField>> {
        self.plugins
            .get(name)
            .map(|p| p.advanced_fields())
            .ok_or_else(|| PluginError::NotFound(name.to_string()))
    }
}
