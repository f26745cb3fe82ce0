//! Resolver configuration.
//!
//! [`ResolverConfig`] carries the four settings that decide where view
//! sources come from. Whether the resolver runs in development or production
//! mode is derived from it ([`ResolverConfig::is_development`]) rather than
//! stored separately.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_RESOURCE_PREFIX, ENV_CONFIG_PATH, ENV_DEV_FOLDERS,
    ENV_RESOURCE_PREFIX,
};

fn default_resource_prefix() -> String {
    DEFAULT_RESOURCE_PREFIX.to_string()
}

fn is_default_resource_prefix(prefix: &String) -> bool {
    prefix == DEFAULT_RESOURCE_PREFIX
}

/// Settings for a [`ViewResolver`](crate::view::ViewResolver).
///
/// # Examples
///
/// ```rust,no_run
/// use fragview::config::ResolverConfig;
///
/// let production = ResolverConfig::default();
/// assert!(!production.is_development());
///
/// let development = ResolverConfig::default()
///     .with_development_folders(vec!["/app/dev/frags".into()]);
/// assert!(development.is_development());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Prefix prepended to resource paths in production mode.
    ///
    /// Concatenated verbatim, so it normally ends with `/`.
    #[serde(default = "default_resource_prefix", skip_serializing_if = "is_default_resource_prefix")]
    pub resource_prefix: String,

    /// Ordered development directories. Any entry enables development mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub development_folders: Vec<PathBuf>,

    /// Names associated with the development folders.
    ///
    /// Carried for the surrounding application; resolution never reads it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub development_folder_names: Vec<String>,

    /// Directory serving packaged resources in production mode.
    ///
    /// When unset, the resolver falls back to the process working directory
    /// unless a loader is supplied programmatically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_root: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resource_prefix: default_resource_prefix(),
            development_folders: Vec::new(),
            development_folder_names: Vec::new(),
            resource_root: None,
        }
    }
}

impl ResolverConfig {
    /// Load configuration the way an application normally would.
    ///
    /// Reads the file named by `FRAGVIEW_CONFIG_PATH`, or `fragview.toml` in
    /// the working directory if it exists, otherwise starts from defaults.
    /// Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific TOML file, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolver config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse resolver config from {}", path.display()))
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Apply `FRAGVIEW_RESOURCE_PREFIX` and `FRAGVIEW_DEV_FOLDERS`.
    ///
    /// An empty `FRAGVIEW_DEV_FOLDERS` clears the development folders, which
    /// forces production mode.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(prefix) = std::env::var(ENV_RESOURCE_PREFIX) {
            tracing::debug!("Resource prefix overridden from environment: {}", prefix);
            self.resource_prefix = prefix;
        }

        if let Some(folders) = std::env::var_os(ENV_DEV_FOLDERS) {
            self.development_folders = std::env::split_paths(&folders)
                .filter(|folder| !folder.as_os_str().is_empty())
                .collect();
            tracing::debug!(
                "Development folders overridden from environment: {:?}",
                self.development_folders
            );
        }
    }

    /// Whether these settings select development mode.
    pub fn is_development(&self) -> bool {
        !self.development_folders.is_empty()
    }

    /// Set the resource prefix.
    pub fn with_resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_prefix = prefix.into();
        self
    }

    /// Set the development folders, in search order.
    pub fn with_development_folders(mut self, folders: Vec<PathBuf>) -> Self {
        self.development_folders = folders;
        self
    }

    /// Set the development folder names.
    pub fn with_development_folder_names(mut self, names: Vec<String>) -> Self {
        self.development_folder_names = names;
        self
    }

    /// Set the packaged resource root.
    pub fn with_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resource_root = Some(root.into());
        self
    }
}
