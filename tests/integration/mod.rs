//! Integration test suite for fragview
//!
//! End-to-end tests driving a [`ViewResolver`](fragview::view::ViewResolver)
//! against real temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **production**: Packaged resource lookup, caching and failure handling
//! - **development**: Live folder lookup, precedence and edit reload
//! - **concurrency**: Shared resolver under concurrent first resolutions
//! - **config_env**: Configuration file and environment driven setup

mod config_env;
mod development;
mod production;
