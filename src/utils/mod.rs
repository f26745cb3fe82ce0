//! Cross-platform utilities
//!
//! - [`platform`] - Home directory lookup and `~`/`$VAR` expansion of configured paths

pub mod platform;
