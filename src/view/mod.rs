//! View resolution: from a logical view name to a compiled, renderable template.
//!
//! A [`ViewResolver`] runs in one of two modes, chosen once when it is built:
//!
//! - **Development** ([`ViewMode::Development`]): sources are read from live
//!   directories on every call and recompiled every time, so edits show up
//!   without a restart. Nothing is cached.
//! - **Production** ([`ViewMode::Production`]): sources come from packaged
//!   resources at `prefix + name + "." + ext`, are compiled once and served from
//!   a [`ViewCache`] afterwards.
//!
//! Any configured development folder selects development mode.
//!
//! # Outcomes
//!
//! [`ViewResolver::resolve`] returns:
//! - `Ok(Some(view))` - the compiled view
//! - `Ok(None)` - no source exists for the name (a normal outcome)
//! - `Err(_)` - a source exists but could not be read or compiled
//!
//! A failed compile never leaves anything in the cache.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fragview::config::ResolverConfig;
//! use fragview::resource::MemoryLoader;
//! use fragview::view::ViewResolver;
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let loader = MemoryLoader::new()
//!     .with_resource("web/module/fragments/patientHeader.tera", "Hello {{ name }}");
//! let resolver = ViewResolver::builder(ResolverConfig::default()).loader(loader).build()?;
//!
//! if let Some(view) = resolver.resolve("patientHeader")? {
//!     assert_eq!(view.render(&json!({ "name": "Amy" }))?, "Hello Amy");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod compiled;

pub use cache::{CacheStats, ViewCache};
pub use compiled::CompiledView;

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::core::ViewError;
use crate::resource::{DirectoryLoader, ResourceLoader, read_resource};
use crate::templating::{TemplateEngine, TeraEngine};
use crate::utils::platform::resolve_path_buf;

/// Anything that can hand out compiled views by name.
///
/// This is the seam a rendering pipeline depends on; [`ViewResolver`] is the
/// standard implementation.
pub trait ViewProvider: Send + Sync {
    /// Resolve `name`, returning `Ok(None)` when no such view exists.
    fn view(&self, name: &str) -> Result<Option<Arc<CompiledView>>, ViewError>;
}

/// Where view sources come from, fixed at build time.
#[derive(Debug, Clone)]
pub enum ViewMode {
    /// Read from live directories, first match wins, no caching.
    Development {
        /// Directories searched in order
        folders: Vec<PathBuf>,
    },
    /// Read from packaged resources and cache compiled views.
    Production {
        /// Prefix prepended to every resource path
        prefix: String,
        /// Loader resolving resource paths
        loader: Arc<dyn ResourceLoader>,
    },
}

impl ViewMode {
    /// Whether this is development mode.
    pub fn is_development(&self) -> bool {
        matches!(self, ViewMode::Development { .. })
    }
}

/// Builder for [`ViewResolver`].
pub struct ViewResolverBuilder {
    config: ResolverConfig,
    engine: Option<Arc<dyn TemplateEngine>>,
    loader: Option<Arc<dyn ResourceLoader>>,
}

impl ViewResolverBuilder {
    /// Use `engine` instead of the default [`TeraEngine`].
    pub fn engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    /// Use an engine that is already shared elsewhere.
    pub fn shared_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Serve production resources from `loader`.
    ///
    /// Takes precedence over `resource_root` in the configuration.
    pub fn loader(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Serve production resources from an already shared loader.
    pub fn shared_loader(mut self, loader: Arc<dyn ResourceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Fix the mode and build the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured development folder or resource root
    /// cannot be expanded (bad `~` usage or undefined environment variable).
    pub fn build(self) -> Result<ViewResolver> {
        let mode = if self.config.is_development() {
            let folders = self
                .config
                .development_folders
                .iter()
                .map(|folder| {
                    resolve_path_buf(folder).with_context(|| {
                        format!("Invalid development folder: {}", folder.display())
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            for folder in &folders {
                if !folder.is_dir() {
                    tracing::warn!(
                        "Development folder {} does not exist; views will not be found there",
                        folder.display()
                    );
                }
            }

            ViewMode::Development {
                folders,
            }
        } else {
            let loader: Arc<dyn ResourceLoader> = match (self.loader, &self.config.resource_root) {
                (Some(loader), _) => loader,
                (None, Some(root)) => {
                    let root = resolve_path_buf(root).with_context(|| {
                        format!("Invalid resource root: {}", root.display())
                    })?;
                    Arc::new(DirectoryLoader::new(root))
                }
                (None, None) => Arc::new(DirectoryLoader::working_dir()),
            };

            ViewMode::Production {
                prefix: self.config.resource_prefix.clone(),
                loader,
            }
        };

        tracing::debug!("View resolver built in {} mode", mode_label(&mode));

        Ok(ViewResolver {
            mode,
            engine: self.engine.unwrap_or_else(|| Arc::new(TeraEngine::new())),
            cache: ViewCache::new(),
            config: self.config,
        })
    }
}

fn mode_label(mode: &ViewMode) -> &'static str {
    if mode.is_development() {
        "development"
    } else {
        "production"
    }
}

/// Resolves view names to compiled views.
///
/// Safe to share between threads; wrap it in an `Arc` and call
/// [`resolve`](Self::resolve) from any request handler.
pub struct ViewResolver {
    mode: ViewMode,
    engine: Arc<dyn TemplateEngine>,
    cache: ViewCache,
    config: ResolverConfig,
}

impl ViewResolver {
    /// Build a resolver with the default engine and loader.
    ///
    /// # Errors
    ///
    /// See [`ViewResolverBuilder::build`].
    pub fn new(config: ResolverConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Start building a resolver from `config`.
    pub fn builder(config: ResolverConfig) -> ViewResolverBuilder {
        ViewResolverBuilder {
            config,
            engine: None,
            loader: None,
        }
    }

    /// Resolve `name` to a compiled view.
    ///
    /// In production mode the source is still looked up on every call, so a
    /// view whose source has gone away resolves to `None`; while it exists,
    /// repeated calls return the same cached `Arc`. In development mode every
    /// call reads and compiles afresh.
    ///
    /// # Errors
    ///
    /// - [`ViewError::EmptyName`] for an empty name
    /// - [`ViewError::SourceRead`] if a source exists but cannot be read
    /// - [`ViewError::Compile`] if the engine rejects the source
    pub fn resolve(&self, name: &str) -> Result<Option<Arc<CompiledView>>, ViewError> {
        if name.is_empty() {
            return Err(ViewError::EmptyName);
        }

        let result = match &self.mode {
            ViewMode::Development {
                ..
            } => self.resolve_fresh(name),
            ViewMode::Production {
                ..
            } => self.resolve_cached(name),
        };

        if let Err(e) = &result {
            tracing::error!("Error creating view for {}: {}", name, e);
        }
        result
    }

    fn resolve_fresh(&self, name: &str) -> Result<Option<Arc<CompiledView>>, ViewError> {
        let Some(source) = self.load_source(name)? else {
            return Ok(None);
        };

        tracing::debug!("Compiling development view: {}", name);
        Ok(Some(Arc::new(self.compile(name, &source)?)))
    }

    fn resolve_cached(&self, name: &str) -> Result<Option<Arc<CompiledView>>, ViewError> {
        // A cached view is only served while its source is still present.
        let Some(source) = self.load_source(name)? else {
            return Ok(None);
        };

        if let Some(cached) = self.cache.get(name) {
            tracing::debug!("Serving cached view: {}", name);
            return Ok(Some(cached));
        }

        tracing::debug!("Generating template for view: {}", name);
        let view = Arc::new(self.compile(name, &source)?);
        Ok(Some(self.cache.insert(name, view)))
    }

    fn compile(&self, name: &str, source: &str) -> Result<CompiledView, ViewError> {
        let template = self.engine.compile(name, source).map_err(|source| ViewError::Compile {
            name: name.to_string(),
            source,
        })?;
        Ok(CompiledView::new(name, template))
    }

    /// Read the raw source for `name`, or `Ok(None)` if there is none.
    ///
    /// Development mode checks `<folder>/<name>.<ext>` in each folder in
    /// order and returns the first file found. Production mode reads
    /// [`resource_path`](Self::resource_path) through the loader.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::SourceRead`] when a source exists but cannot be read.
    pub fn load_source(&self, name: &str) -> Result<Option<String>, ViewError> {
        match &self.mode {
            ViewMode::Development {
                folders,
            } => self.load_from_folders(name, folders),
            ViewMode::Production {
                prefix,
                loader,
            } => self.load_from_resources(name, &self.path_for(prefix, name), loader.as_ref()),
        }
    }

    fn load_from_folders(
        &self,
        name: &str,
        folders: &[PathBuf],
    ) -> Result<Option<String>, ViewError> {
        let file_name = format!("{}.{}", name, self.engine.extension());

        for folder in folders {
            let candidate = folder.join(&file_name);
            if candidate.is_file() {
                tracing::debug!("Loading view {} from {}", name, candidate.display());
                return read_file(name, &candidate).map(Some);
            }
        }

        tracing::debug!("View {} not found in {} development folder(s)", name, folders.len());
        Ok(None)
    }

    fn load_from_resources(
        &self,
        name: &str,
        path: &str,
        loader: &dyn ResourceLoader,
    ) -> Result<Option<String>, ViewError> {
        tracing::debug!("Loading view {} from resource {}", name, path);

        read_resource(loader, path).map_err(|source| ViewError::SourceRead {
            name: name.to_string(),
            location: loader.describe(path),
            source,
        })
    }

    /// The resource path production mode requests for `name`.
    ///
    /// Always `resource_prefix + name + "." + extension`, with no normalization.
    pub fn resource_path(&self, name: &str) -> String {
        self.path_for(self.resource_prefix(), name)
    }

    fn path_for(&self, prefix: &str, name: &str) -> String {
        format!("{}{}.{}", prefix, name, self.engine.extension())
    }

    /// The mode fixed at build time.
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Whether this resolver reads from development folders.
    pub fn is_development(&self) -> bool {
        self.mode.is_development()
    }

    /// The configuration this resolver was built from.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The configured resource prefix.
    pub fn resource_prefix(&self) -> &str {
        &self.config.resource_prefix
    }

    /// The development folder names, passed through untouched.
    pub fn development_folder_names(&self) -> &[String] {
        &self.config.development_folder_names
    }

    /// Cache counters. Stay at zero in development mode.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Whether a compiled view is cached under `name`.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains(name)
    }
}

fn read_file(name: &str, path: &Path) -> Result<String, ViewError> {
    std::fs::read_to_string(path).map_err(|source| ViewError::SourceRead {
        name: name.to_string(),
        location: path.display().to_string(),
        source,
    })
}

impl ViewProvider for ViewResolver {
    fn view(&self, name: &str) -> Result<Option<Arc<CompiledView>>, ViewError> {
        self.resolve(name)
    }
}

impl fmt::Debug for ViewResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewResolver")
            .field("mode", &self.mode)
            .field("extension", &self.engine.extension())
            .field("cache", &self.cache.stats())
            .finish()
    }
}
