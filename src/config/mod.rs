//! Configuration for the view resolver
//!
//! Resolver settings are fixed once, before the resolver serves any request;
//! there is no hot reload of the mode. They can be built in code or loaded
//! from a TOML file and then adjusted by environment variables.
//!
//! # Configuration File (`fragview.toml`)
//!
//! ```toml
//! # Prefix prepended to packaged resource paths (production mode)
//! resource_prefix = "web/module/fragments/"
//!
//! # Any entry here switches the resolver into development mode.
//! # Search order matters: the first folder holding `<name>.tera` wins.
//! development_folders = ["~/src/app/fragments", "$SHARED_FRAGS"]
//!
//! # Passed through for callers; resolution does not consult it
//! development_folder_names = ["app", "shared"]
//!
//! # Directory holding packaged resources (defaults to the working directory)
//! resource_root = "/opt/app/resources"
//! ```
//!
//! # Configuration Priority
//!
//! 1. Environment variables (`FRAGVIEW_RESOURCE_PREFIX`, `FRAGVIEW_DEV_FOLDERS`)
//! 2. The file named by `FRAGVIEW_CONFIG_PATH`, or `fragview.toml` in the working directory
//! 3. Default values

pub mod resolver;

pub use resolver::ResolverConfig;
