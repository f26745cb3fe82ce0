//! Test utilities for fragview
//!
//! Helpers for unit and integration tests: once-only tracing setup and a
//! [`ViewFixture`] that lays out resource roots and development folders in
//! temporary directories.
//!
//! # Example
//!
//! ```rust,no_run
//! use fragview::test_utils::ViewFixture;
//!
//! # fn example() -> anyhow::Result<()> {
//! let fixture = ViewFixture::new()?;
//! fixture.add_resource("patientHeader", "Hello {{ name }}")?;
//! let resolver = fixture.production_resolver()?;
//! assert!(resolver.resolve("patientHeader")?.is_some());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::ResolverConfig;
use crate::constants::{DEFAULT_RESOURCE_PREFIX, TERA_TEMPLATE_EXTENSION};
use crate::view::ViewResolver;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise honours `RUST_LOG`. With neither, no
/// subscriber is installed.
///
/// ```bash
/// RUST_LOG=fragview=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Temporary resource root plus any number of development folders.
///
/// Resources are written beneath `<root>/web/module/fragments/` so that a
/// resolver with the default prefix finds them.
pub struct ViewFixture {
    root: TempDir,
    dev_folders: Vec<TempDir>,
}

impl ViewFixture {
    /// Create an empty fixture.
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: TempDir::new().context("Failed to create resource root")?,
            dev_folders: Vec::new(),
        })
    }

    /// The packaged resource root.
    pub fn resource_root(&self) -> &Path {
        self.root.path()
    }

    /// Write a packaged view source under the default prefix.
    pub fn add_resource(&self, name: &str, content: &str) -> Result<PathBuf> {
        let relative = format!("{}{}.{}", DEFAULT_RESOURCE_PREFIX, name, TERA_TEMPLATE_EXTENSION);
        let path = self.root.path().join(relative);
        write_file(&path, content)?;
        Ok(path)
    }

    /// Create a new empty development folder and return its index.
    pub fn add_dev_folder(&mut self) -> Result<usize> {
        self.dev_folders.push(TempDir::new().context("Failed to create development folder")?);
        Ok(self.dev_folders.len() - 1)
    }

    /// Path of the development folder at `index`.
    pub fn dev_folder(&self, index: usize) -> &Path {
        self.dev_folders[index].path()
    }

    /// All development folders, in creation order.
    pub fn dev_folders(&self) -> Vec<PathBuf> {
        self.dev_folders.iter().map(|dir| dir.path().to_path_buf()).collect()
    }

    /// Write (or overwrite) a view source in the development folder at `index`.
    pub fn write_dev_view(&self, index: usize, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dev_folder(index).join(format!("{}.{}", name, TERA_TEMPLATE_EXTENSION));
        write_file(&path, content)?;
        Ok(path)
    }

    /// Configuration reading packaged resources from this fixture's root.
    pub fn production_config(&self) -> ResolverConfig {
        ResolverConfig::default().with_resource_root(self.root.path())
    }

    /// Configuration searching this fixture's development folders.
    pub fn development_config(&self) -> ResolverConfig {
        ResolverConfig::default().with_development_folders(self.dev_folders())
    }

    /// Production resolver over this fixture.
    pub fn production_resolver(&self) -> Result<ViewResolver> {
        ViewResolver::new(self.production_config())
    }

    /// Development resolver over this fixture.
    pub fn development_resolver(&self) -> Result<ViewResolver> {
        ViewResolver::new(self.development_config())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
