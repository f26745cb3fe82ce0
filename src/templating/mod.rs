//! Template engine seam for fragview.
//!
//! The resolver never parses or executes templates itself. It hands raw
//! source text to a [`TemplateEngine`] and keeps whatever [`CompiledTemplate`]
//! comes back. The engine also owns the file extension of its template
//! family, so `<name>.<ext>` lookups stay consistent with what it can compile.
//!
//! [`TeraEngine`] is the bundled implementation, backed by Tera.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fragview::templating::{TemplateEngine, TeraEngine};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), fragview::templating::TemplateError> {
//! let engine = TeraEngine::new();
//! let template = engine.compile("greeting", "Hello {{ name }}")?;
//! let rendered = template.render(&json!({ "name": "Amy" }))?;
//! assert_eq!(rendered, "Hello Amy");
//! # Ok(())
//! # }
//! ```

pub mod error;

pub use error::{TemplateError, TemplateErrorKind, format_tera_error};

use std::fmt;
use tera::{Context as TeraContext, Tera};

use crate::constants::TERA_TEMPLATE_EXTENSION;

/// An engine that turns template source into a renderable template.
pub trait TemplateEngine: Send + Sync {
    /// File extension (without the dot) of sources this engine compiles.
    fn extension(&self) -> &str;

    /// Parse `source` into a compiled template.
    ///
    /// `name` is used for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateErrorKind::Syntax`] error for malformed source.
    fn compile(
        &self,
        name: &str,
        source: &str,
    ) -> Result<Box<dyn CompiledTemplate>, TemplateError>;
}

/// Engine-produced artifact that can be rendered against a data context.
///
/// Expensive to build, cheap to reuse. Implementations must be immutable
/// once compiled so a single instance can serve concurrent renders.
pub trait CompiledTemplate: Send + Sync + fmt::Debug {
    /// Render against a JSON object context.
    fn render(&self, context: &serde_json::Value) -> Result<String, TemplateError>;
}

/// Tera-backed template engine.
///
/// Every compiled template gets its own Tera instance holding exactly one
/// template, seeded from a prototype instance so custom filters, functions
/// and testers registered on the prototype are available to every view.
pub struct TeraEngine {
    base: Tera,
}

impl TeraEngine {
    /// Create an engine with Tera's built-in filters only.
    pub fn new() -> Self {
        Self {
            base: Tera::default(),
        }
    }

    /// Create an engine from a prototype Tera instance.
    ///
    /// Register filters and functions on `base` before handing it over:
    ///
    /// ```rust,no_run
    /// use fragview::templating::TeraEngine;
    /// use std::collections::HashMap;
    ///
    /// let mut base = tera::Tera::default();
    /// base.register_filter(
    ///     "shout",
    ///     |value: &tera::Value, _: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
    ///         Ok(tera::Value::String(value.as_str().unwrap_or_default().to_uppercase()))
    ///     },
    /// );
    /// let engine = TeraEngine::from_base(base);
    /// ```
    pub fn from_base(base: Tera) -> Self {
        Self {
            base,
        }
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TeraEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeraEngine").field("extension", &TERA_TEMPLATE_EXTENSION).finish()
    }
}

impl TemplateEngine for TeraEngine {
    fn extension(&self) -> &str {
        TERA_TEMPLATE_EXTENSION
    }

    fn compile(
        &self,
        name: &str,
        source: &str,
    ) -> Result<Box<dyn CompiledTemplate>, TemplateError> {
        let mut tera = Tera::default();
        tera.extend(&self.base)
            .map_err(|e| TemplateError::from_tera(TemplateErrorKind::Syntax, &e, name))?;
        tera.add_raw_template(name, source)
            .map_err(|e| TemplateError::from_tera(TemplateErrorKind::Syntax, &e, name))?;

        Ok(Box::new(TeraTemplate {
            name: name.to_string(),
            tera,
        }))
    }
}

/// A single parsed Tera template.
pub struct TeraTemplate {
    name: String,
    tera: Tera,
}

impl fmt::Debug for TeraTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeraTemplate").field("name", &self.name).finish()
    }
}

impl CompiledTemplate for TeraTemplate {
    fn render(&self, context: &serde_json::Value) -> Result<String, TemplateError> {
        let context = TeraContext::from_value(context.clone()).map_err(|e| {
            TemplateError::context(format!(
                "render context must be a JSON object: {}",
                format_tera_error(&e, &self.name)
            ))
        })?;

        self.tera
            .render(&self.name, &context)
            .map_err(|e| TemplateError::from_tera(TemplateErrorKind::Render, &e, &self.name))
    }
}
