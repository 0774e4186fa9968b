//! Error types for view rendering.
//!
//! This module provides [`RenderError`], the error type for all rendering
//! operations. It abstracts over the underlying template engine's errors,
//! keeping engine-supplied context (file, line) where available without
//! exposing the engine's own error type in the public API.

use std::fmt;

/// Error type for renderer actions.
///
/// Template failures carry the file and line the engine reported, when it
/// reported any. All renderer implementations return this type so that the
/// dispatch layer can treat backends uniformly.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error or runtime failure inside the template.
    Template {
        /// Engine-supplied failure description.
        message: String,
        /// The template file being rendered, when known.
        file: Option<String>,
        /// The line the engine attributed the failure to, when known.
        line: Option<usize>,
    },

    /// The template file does not exist.
    TemplateNotFound(String),

    /// View data could not be serialized for the engine.
    Serialization(String),

    /// I/O error reading the template from disk.
    Io(std::io::Error),

    /// Other operational error.
    Operation(String),
}

impl RenderError {
    /// Creates a template error with no positional context.
    pub fn template(message: impl Into<String>) -> Self {
        RenderError::Template {
            message: message.into(),
            file: None,
            line: None,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Template {
                message,
                file,
                line,
            } => {
                write!(f, "template error: {}", message)?;
                if let Some(file) = file {
                    write!(f, " (in {}", file)?;
                    if let Some(line) = line {
                        write!(f, ", line {}", line)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
            RenderError::TemplateNotFound(path) => write!(f, "template not found: {}", path),
            RenderError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            RenderError::Io(err) => write!(f, "I/O error: {}", err),
            RenderError::Operation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

// Conversion from minijinja::Error - keeps the engine out of the public API
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::Template {
                message: err.to_string(),
                file: err.name().map(str::to_string),
                line: err.line(),
            },
            _ => RenderError::Operation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_template_with_context() {
        let err = RenderError::Template {
            message: "unexpected end of input".into(),
            file: Some("views/home.jinja".into()),
            line: Some(3),
        };
        let display = err.to_string();
        assert!(display.contains("unexpected end of input"));
        assert!(display.contains("views/home.jinja"));
        assert!(display.contains("line 3"));
    }

    #[test]
    fn test_error_display_template_without_context() {
        let err = RenderError::template("boom");
        assert_eq!(err.to_string(), "template error: boom");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = RenderError::TemplateNotFound("views/missing.jinja".into());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("views/missing.jinja"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RenderError = io_err.into();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unclosed tag");
        let err: RenderError = mj_err.into();
        assert!(matches!(err, RenderError::Template { .. }));
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'x' not found",
        );
        let err: RenderError = mj_err.into();
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
    }
}
