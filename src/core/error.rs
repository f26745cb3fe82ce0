//! Error handling for fragview
//!
//! Resolution has exactly two outcomes that are not errors: a compiled view,
//! or "no such view" (`Ok(None)`). Everything in [`ViewError`] is a genuine
//! failure that the caller should surface, typically as an internal error
//! response rather than a missing-view response.
//!
//! # Error Categories
//!
//! - **Resolution failures**: [`ViewError::SourceRead`] and [`ViewError::Compile`].
//!   A source exists but could not be read or parsed. Retrying will not help
//!   for malformed templates; transient I/O retries are left to the caller.
//! - **Render failures**: [`ViewError::Render`], raised when a resolved view is
//!   rendered against a data context it cannot satisfy.
//! - **Caller errors**: [`ViewError::EmptyName`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use fragview::config::ResolverConfig;
//! use fragview::view::ViewResolver;
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = ViewResolver::new(ResolverConfig::default())?;
//! match resolver.resolve("patientHeader") {
//!     Ok(Some(view)) => println!("resolved {}", view.name()),
//!     Ok(None) => println!("no such view"),
//!     Err(e) => eprintln!("{}", e.format_with_context()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

use crate::templating::{TemplateError, TemplateErrorKind};

/// The error type for view resolution and rendering.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A view was requested with an empty name.
    #[error("View name must not be empty")]
    EmptyName,

    /// The view source exists but could not be read.
    ///
    /// Covers permission problems, partial reads and sources that are not
    /// valid UTF-8. Absence of a source is never reported this way.
    #[error("Failed to read source for view '{name}' from {location}")]
    SourceRead {
        /// Name of the view being resolved
        name: String,
        /// Where the source was being read from (file path or resource path)
        location: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The view source was read but the template engine rejected it.
    #[error("Failed to compile view '{name}'")]
    Compile {
        /// Name of the view being resolved
        name: String,
        /// The engine error
        #[source]
        source: TemplateError,
    },

    /// A resolved view failed to render against its data context.
    #[error("Failed to render view '{name}'")]
    Render {
        /// Name of the rendered view
        name: String,
        /// The engine error
        #[source]
        source: TemplateError,
    },
}

impl ViewError {
    /// Name of the view involved, if any.
    pub fn view_name(&self) -> Option<&str> {
        match self {
            ViewError::EmptyName => None,
            ViewError::SourceRead {
                name,
                ..
            }
            | ViewError::Compile {
                name,
                ..
            }
            | ViewError::Render {
                name,
                ..
            } => Some(name),
        }
    }

    /// True for failures raised while resolving (reading or compiling) a view.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, ViewError::SourceRead { .. } | ViewError::Compile { .. })
    }

    /// Generate a multi-line diagnostic with a suggestion.
    pub fn format_with_context(&self) -> String {
        match self {
            ViewError::EmptyName => {
                "ERROR: Empty View Name\n\nA view was requested with an empty name.\n\n\
                 SUGGESTION: Check the caller that builds the view name.\n"
                    .to_string()
            }
            ViewError::SourceRead {
                name,
                location,
                source,
            } => {
                let mut msg = String::new();
                msg.push_str("ERROR: View Source Unreadable\n\n");
                msg.push_str(&format!("View: {}\n", name));
                msg.push_str(&format!("Location: {}\n", location));
                msg.push_str(&format!("Error: {}\n", source));
                msg.push_str("\nSUGGESTION: Check file permissions and that the source is UTF-8 text.\n");
                msg
            }
            ViewError::Compile {
                name,
                source,
            } => format_template_error("ERROR: View Template Syntax Error", name, source),
            ViewError::Render {
                name,
                source,
            } => format_template_error("ERROR: View Rendering Failed", name, source),
        }
    }
}

fn format_template_error(header: &str, name: &str, source: &TemplateError) -> String {
    let mut msg = String::new();

    msg.push_str(header);
    msg.push_str("\n\n");
    msg.push_str(&format!("View: {}\n", name));
    if let Some(line) = source.line {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push_str(&format!("Error: {}\n", source.message));

    match source.kind {
        TemplateErrorKind::Syntax => {
            msg.push_str("\nSUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
            msg.push_str("Common issues:\n");
            msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
            msg.push_str("  - Invalid filter names\n");
            msg.push_str("  - Missing quotes around string values\n");
        }
        TemplateErrorKind::Render => {
            msg.push_str("\nSUGGESTION: Make sure the render context provides every variable the view uses.\n");
        }
        TemplateErrorKind::Context => {
            msg.push_str("\nSUGGESTION: Pass a map/struct as the render context, not a list or scalar.\n");
        }
    }

    msg
}
