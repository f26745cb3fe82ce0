//! Platform helpers for configured filesystem paths.
//!
//! Development folders and resource roots usually come from configuration
//! files or environment variables, so they may contain `~/` or environment
//! variable references. [`resolve_path`] expands both the same way on every
//! platform, with `%VAR%` additionally understood on Windows.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fragview::utils::platform::resolve_path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let frags = resolve_path("~/work/app/fragments")?;
//! # #[cfg(unix)]
//! let shared = resolve_path("$APP_HOME/fragments")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Whether the crate was compiled for Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// The current user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expand a leading `~/` and environment variable references in `path`.
///
/// # Supported Patterns
///
/// - `~/path` - Expands to `{home}/path`
/// - `$VAR/path` and `${VAR}/path` - Expands environment variables
/// - `%VAR%/path` (Windows) - Expands environment variables
///
/// # Errors
///
/// Returns an error for `~user` forms, undefined variables (Unix syntax),
/// or when the home directory cannot be determined.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = if let Some(stripped) = path.strip_prefix("~/") {
        get_home_dir()?.join(stripped)
    } else if path == "~" {
        get_home_dir()?
    } else if path.starts_with('~') {
        return Err(anyhow::anyhow!(
            "Invalid path: {path}\n\n\
            Tilde expansion only supports '~/' for the current user's home directory."
        ));
    } else {
        PathBuf::from(path)
    };

    let path_str = expanded.to_string_lossy();

    let expanded_str = if is_windows() && path_str.contains('%') {
        let mut result = path_str.to_string();
        let re = Regex::new(r"%([^%]+)%").context("Invalid Windows variable pattern")?;
        for cap in re.captures_iter(&path_str) {
            if let Some(var_name) = cap.get(1) {
                if let Ok(value) = std::env::var(var_name.as_str()) {
                    result = result.replace(&format!("%{}%", var_name.as_str()), &value);
                }
            }
        }
        match shellexpand::env(&result) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => result,
        }
    } else {
        shellexpand::env(&path_str)
            .with_context(|| {
                format!(
                    "Failed to expand environment variables in path: {path_str}\n\n\
                    Check for undefined variables (e.g. $UNDEFINED_VAR) or invalid syntax (use $VAR or ${{VAR}})"
                )
            })?
            .into_owned()
    };

    Ok(PathBuf::from(expanded_str))
}

/// [`resolve_path`] for an already-typed path.
///
/// Paths that are not valid UTF-8 are returned untouched since they cannot
/// contain expandable references that shellexpand understands.
pub fn resolve_path_buf(path: &Path) -> Result<PathBuf> {
    match path.to_str() {
        Some(s) => resolve_path(s),
        None => Ok(path.to_path_buf()),
    }
}
