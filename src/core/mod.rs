//! Core types for fragview
//!
//! Holds the error type shared by every other module. See [`error`] for the
//! taxonomy of resolution and render failures.

pub mod error;

pub use error::ViewError;
