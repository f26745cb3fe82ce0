//! Template error type shared by every engine implementation.
//!
//! Engines translate their native failures into [`TemplateError`] so the
//! resolver can report compile and render failures without knowing which
//! engine produced them.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Pest location marker (`--> line:column`) in Tera parse errors.
static PEST_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-->\s*(\d+):(\d+)").expect("location pattern is valid"));

/// Which phase of template processing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// The source could not be parsed into a template.
    Syntax,
    /// The template parsed but failed while rendering.
    Render,
    /// The data context handed to the template was unusable.
    Context,
}

impl fmt::Display for TemplateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateErrorKind::Syntax => write!(f, "syntax error"),
            TemplateErrorKind::Render => write!(f, "render error"),
            TemplateErrorKind::Context => write!(f, "context error"),
        }
    }
}

/// A failure raised by a template engine.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Template {kind}: {message}")]
pub struct TemplateError {
    /// Phase that failed
    pub kind: TemplateErrorKind,
    /// Cleaned, human-readable description
    pub message: String,
    /// 1-based line number, when the engine reported one
    pub line: Option<usize>,
}

impl TemplateError {
    /// Create a syntax error without location information.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            kind: TemplateErrorKind::Syntax,
            message: message.into(),
            line: None,
        }
    }

    /// Create a render error without location information.
    pub fn render(message: impl Into<String>) -> Self {
        Self {
            kind: TemplateErrorKind::Render,
            message: message.into(),
            line: None,
        }
    }

    /// Create a context error.
    pub fn context(message: impl Into<String>) -> Self {
        Self {
            kind: TemplateErrorKind::Context,
            message: message.into(),
            line: None,
        }
    }

    /// Translate a Tera error raised while processing `template_name`.
    pub fn from_tera(kind: TemplateErrorKind, error: &tera::Error, template_name: &str) -> Self {
        Self {
            kind,
            message: format_tera_error(error, template_name),
            line: extract_line_from_tera_error(error),
        }
    }
}

/// Flatten a Tera error chain into a readable message.
///
/// Tera wraps the interesting cause in generic "Failed to parse 'name'"
/// layers. Those wrappers are dropped and the template name is replaced
/// with a neutral word so the message reads the same for every view.
pub fn format_tera_error(error: &tera::Error, template_name: &str) -> String {
    use std::error::Error;

    let quoted_name = format!("'{}'", template_name);
    let parse_wrapper = format!("Failed to parse {}", quoted_name);
    let render_wrapper = format!("Failed to render {}", quoted_name);

    let mut all_messages = vec![error.to_string()];
    let mut current_error: Option<&dyn Error> = error.source();
    while let Some(err) = current_error {
        all_messages.push(err.to_string());
        current_error = err.source();
    }

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| {
            msg.replace(&parse_wrapper, "")
                .replace(&render_wrapper, "")
                .replace(&format!("while rendering {}", quoted_name), "")
                .replace(&quoted_name, "template")
                .trim()
                .to_string()
        })
        .filter(|msg| !msg.is_empty())
        .collect();

    if messages.is_empty() {
        "Template processing failed (no further details from engine)".to_string()
    } else {
        messages.join("\n  → ")
    }
}

/// Extract the line number from a Tera error.
///
/// Tera parse errors carry a pest location such as `--> 3:7`.
fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
    let error_msg = format!("{:?}", error);

    let caps = PEST_LOCATION.captures(&error_msg)?;
    caps.get(1)?.as_str().parse::<usize>().ok()
}
