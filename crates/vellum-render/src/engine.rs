//! Renderer action abstraction.
//!
//! This module defines the [`ViewRenderer`] trait, the contract between the
//! dispatch layer and a template backend: a template file path plus optional
//! view data in, rendered HTML out. The bundled implementation is
//! [`MiniJinjaRenderer`].
//!
//! Renderer actions are asynchronous. The dispatch layer reads all shared
//! state synchronously before invoking the action, so implementations are
//! free to perform file I/O as long as it is non-blocking.

use std::path::Path;

use async_trait::async_trait;
use minijinja::{Environment, Value};

use crate::error::RenderError;

/// A renderer that turns a template file plus view data into HTML.
///
/// `data` is `None` when the requested view was never loaded with data.
/// Implementations must render with their engine's notion of undefined
/// data in that case rather than failing; a view with no data is a normal
/// request, not an error.
#[async_trait]
pub trait ViewRenderer: Send + Sync {
    /// Renders the template file at `template` with the given view data.
    async fn render(
        &self,
        template: &Path,
        data: Option<serde_json::Value>,
    ) -> Result<String, RenderError>;
}

/// MiniJinja-based renderer.
///
/// This is the default backend: Jinja2-compatible syntax with loops,
/// conditionals, filters and includes. The template file is read from disk
/// on every render, so edits are picked up without restarting the host
/// application.
///
/// # Example
///
/// ```rust,ignore
/// use vellum_render::{MiniJinjaRenderer, ViewRenderer};
/// use serde_json::json;
///
/// let renderer = MiniJinjaRenderer::new();
/// let html = renderer
///     .render("views/home.jinja".as_ref(), Some(json!({"title": "Hi"})))
///     .await?;
/// ```
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with a default environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Creates a renderer whose environment loads `{% include %}` targets
    /// from `root`.
    pub fn with_template_root(root: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(root));
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register custom filters or functions before the renderer
    /// is handed to the registry.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewRenderer for MiniJinjaRenderer {
    async fn render(
        &self,
        template: &Path,
        data: Option<serde_json::Value>,
    ) -> Result<String, RenderError> {
        let source = tokio::fs::read_to_string(template).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateNotFound(template.display().to_string())
            } else {
                RenderError::Io(err)
            }
        })?;

        let value = match &data {
            Some(data) => Value::from_serialize(data),
            None => Value::UNDEFINED,
        };

        self.env
            .render_str(&source, value)
            .map_err(|err| located(err, template))
    }
}

/// Attributes an engine error to the template file being rendered.
///
/// `render_str` reports the synthetic name `<string>` as the source, which
/// is useless to the host application; the on-disk path replaces it.
fn located(err: minijinja::Error, template: &Path) -> RenderError {
    match RenderError::from(err) {
        RenderError::Template { message, line, .. } => RenderError::Template {
            message,
            file: Some(template.display().to_string()),
            line,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_template(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_render_with_data() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "home.jinja", "<h1>{{ title }}</h1>");

        let renderer = MiniJinjaRenderer::new();
        let html = renderer
            .render(&path, Some(json!({"title": "Hi"})))
            .await
            .unwrap();
        assert_eq!(html, "<h1>Hi</h1>");
    }

    #[tokio::test]
    async fn test_render_without_data_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "home.jinja", "<h1>{{ title }}</h1>");

        let renderer = MiniJinjaRenderer::new();
        let html = renderer.render(&path, None).await.unwrap();
        assert_eq!(html, "<h1></h1>");
    }

    #[tokio::test]
    async fn test_render_with_loop() {
        let dir = TempDir::new().unwrap();
        let path = write_template(
            &dir,
            "list.jinja",
            "{% for item in items %}{{ item }},{% endfor %}",
        );

        let renderer = MiniJinjaRenderer::new();
        let html = renderer
            .render(&path, Some(json!({"items": ["a", "b", "c"]})))
            .await
            .unwrap();
        assert_eq!(html, "a,b,c,");
    }

    #[tokio::test]
    async fn test_render_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.jinja");

        let renderer = MiniJinjaRenderer::new();
        let err = renderer.render(&path, None).await.unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
    }

    #[tokio::test]
    async fn test_render_syntax_error_carries_file() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "broken.jinja", "{% for x in %}");

        let renderer = MiniJinjaRenderer::new();
        let err = renderer.render(&path, None).await.unwrap_err();
        match err {
            RenderError::Template { file, .. } => {
                assert_eq!(file, Some(path.display().to_string()));
            }
            other => panic!("expected template error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_render_with_include_from_root() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "_partial.jinja", "PARTIAL");
        let path = write_template(&dir, "main.jinja", "A {% include '_partial.jinja' %} B");

        let renderer = MiniJinjaRenderer::with_template_root(dir.path());
        let html = renderer.render(&path, None).await.unwrap();
        assert_eq!(html, "A PARTIAL B");
    }
}
