//! Global constants used throughout the fragview codebase.
//!
//! Defaults for the resolver configuration and the names of the environment
//! variables that override it live here so they are discoverable in one place.

/// Default prefix prepended to packaged resource paths in production mode.
pub const DEFAULT_RESOURCE_PREFIX: &str = "web/module/fragments/";

/// Extension of view source files for the Tera template family.
pub const TERA_TEMPLATE_EXTENSION: &str = "tera";

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fragview.toml";

/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG_PATH: &str = "FRAGVIEW_CONFIG_PATH";

/// Environment variable overriding the resource prefix.
pub const ENV_RESOURCE_PREFIX: &str = "FRAGVIEW_RESOURCE_PREFIX";

/// Environment variable overriding the development folders.
///
/// Uses the platform path-list syntax (`:` on Unix, `;` on Windows).
pub const ENV_DEV_FOLDERS: &str = "FRAGVIEW_DEV_FOLDERS";
