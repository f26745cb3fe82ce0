//! fragview - fragment view resolution
//!
//! Maps a logical view name to a compiled, renderable template. Sources come
//! either from live development directories or from packaged resources, and
//! compiled templates are cached in production so each view is parsed once.
//!
//! # Architecture Overview
//!
//! A caller asks a [`ViewResolver`](view::ViewResolver) for a name. The
//! resolver loads the raw source, hands it to a
//! [`TemplateEngine`](templating::TemplateEngine), wraps the result in a
//! [`CompiledView`](view::CompiledView) and returns it, cached or not
//! depending on the mode. Rendering happens later, whenever the caller has a
//! data context.
//!
//! ## Modes
//!
//! - **Development**: any development folder configured. Every call re-reads
//!   `<folder>/<name>.tera` (first folder wins) and recompiles.
//! - **Production**: no development folders. Sources are read from
//!   `<resource_prefix><name>.tera` through a resource loader, compiled once
//!   and cached for the life of the resolver.
//!
//! # Core Modules
//!
//! - [`view`] - Resolver, modes, compiled views and the view cache
//! - [`templating`] - Template engine seam and the Tera implementation
//! - [`resource`] - Packaged resource loaders
//! - [`config`] - Resolver configuration (TOML file and environment)
//! - [`core`] - Error types
//!
//! ## Supporting Modules
//! - [`constants`] - Defaults and environment variable names
//! - [`utils`] - Path expansion helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use fragview::config::ResolverConfig;
//! use fragview::view::ViewResolver;
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = ViewResolver::new(ResolverConfig::load()?)?;
//!
//! match resolver.resolve("patientHeader")? {
//!     Some(view) => println!("{}", view.render(&json!({ "name": "Amy" }))?),
//!     None => println!("no view named patientHeader"),
//! }
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod config;
pub mod core;
pub mod resource;
pub mod templating;
pub mod view;

// Supporting modules
pub mod constants;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
