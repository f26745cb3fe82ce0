//! Compiled view value type.

use serde::Serialize;
use std::fmt;

use crate::core::ViewError;
use crate::templating::{CompiledTemplate, TemplateError};

/// A view name paired with its compiled template.
///
/// Immutable once built. In production mode a single instance per name is
/// shared by every caller through an `Arc`.
pub struct CompiledView {
    name: String,
    template: Box<dyn CompiledTemplate>,
}

impl CompiledView {
    /// Wrap a compiled template.
    pub fn new(name: impl Into<String>, template: Box<dyn CompiledTemplate>) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// The view name this template was resolved for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with any serializable data context.
    ///
    /// The context must serialize to a map (a struct, `HashMap`, or JSON object).
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Render`] if the context cannot be serialized or
    /// the template fails to render against it.
    pub fn render<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, ViewError> {
        let value = serde_json::to_value(data).map_err(|e| ViewError::Render {
            name: self.name.clone(),
            source: TemplateError::context(format!("failed to serialize render context: {}", e)),
        })?;
        self.render_value(&value)
    }

    /// Render with a JSON data context.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Render`] if the template fails to render.
    pub fn render_value(&self, context: &serde_json::Value) -> Result<String, ViewError> {
        self.template.render(context).map_err(|source| ViewError::Render {
            name: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for CompiledView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledView")
            .field("name", &self.name)
            .field("template", &self.template)
            .finish()
    }
}
