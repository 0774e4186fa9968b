//! Renderer descriptors and the name-keyed registry.
//!
//! # Design
//!
//! A [`RendererDescriptor`] bundles everything the dispatch layer needs to
//! invoke one rendering strategy: the file extension its templates use and
//! the asynchronous action that renders them. Descriptors live in a
//! [`RendererRegistry`] keyed by name; re-registering a name replaces the
//! previous entry (last write wins).
//!
//! # Extension defaulting
//!
//! A descriptor may omit its extension, in which case the effective
//! extension is `"." + name`: a renderer registered as `tpl` with no
//! explicit extension resolves `views/home` to `views/home.tpl`. This is a
//! configuration rule, stated here rather than inferred at call sites.
//!
//! # Built-ins
//!
//! [`RendererRegistry::with_builtins`] seeds the bundled MiniJinja backend
//! under [`DEFAULT_RENDERER`]. The names in [`RESERVED_RENDERER_NAMES`] are
//! planned engine slots that currently register nothing; host applications
//! that want them supply their own descriptor under those names.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::engine::{MiniJinjaRenderer, ViewRenderer};

/// Name of the renderer seeded by [`RendererRegistry::with_builtins`].
pub const DEFAULT_RENDERER: &str = "jinja";

/// Engine names reserved for future bundled backends. Nothing is registered
/// under them.
pub const RESERVED_RENDERER_NAMES: &[&str] = &["tera", "handlebars"];

/// A named rendering strategy: template extension plus renderer action.
#[derive(Clone)]
pub struct RendererDescriptor {
    extension: Option<String>,
    action: Arc<dyn ViewRenderer>,
}

impl RendererDescriptor {
    /// Creates a descriptor with no explicit extension.
    ///
    /// The effective extension falls back to `"." + name` at lookup time.
    pub fn new(action: Arc<dyn ViewRenderer>) -> Self {
        Self {
            extension: None,
            action,
        }
    }

    /// Sets the file extension appended when resolving a template file.
    ///
    /// Include the leading dot: `".jinja"`, not `"jinja"`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// The bundled MiniJinja descriptor.
    pub fn minijinja() -> Self {
        Self::new(Arc::new(MiniJinjaRenderer::new())).with_extension(".jinja")
    }

    /// Returns the explicit extension, if one was configured.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns the extension used to resolve template files for this
    /// descriptor when registered under `name`.
    pub fn effective_extension(&self, name: &str) -> String {
        match &self.extension {
            Some(extension) => extension.clone(),
            None => format!(".{}", name),
        }
    }

    /// Returns a handle to the renderer action.
    pub fn action(&self) -> Arc<dyn ViewRenderer> {
        Arc::clone(&self.action)
    }
}

impl fmt::Debug for RendererDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererDescriptor")
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A descriptor was registered without a name.
    MissingName,

    /// No descriptor is registered under the requested name.
    NotFound {
        /// The name that was requested.
        name: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::MissingName => {
                write!(f, "renderer registration requires a non-empty name")
            }
            RegistryError::NotFound { name } => {
                write!(f, "no renderer registered under \"{}\"", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry of renderer descriptors, keyed by name.
#[derive(Debug, Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, RendererDescriptor>,
}

impl RendererRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the bundled backends.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Infallible: the builtin name is non-empty.
        let _ = registry.register(DEFAULT_RENDERER, RendererDescriptor::minijinja());
        registry
    }

    /// Inserts or replaces the descriptor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingName`] when `name` is empty.
    pub fn register(
        &mut self,
        name: &str,
        descriptor: RendererDescriptor,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::MissingName);
        }
        self.renderers.insert(name.to_string(), descriptor);
        Ok(())
    }

    /// Looks up the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&RendererDescriptor> {
        self.renderers.get(name)
    }

    /// Returns true if a descriptor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Returns an iterator over registered renderer names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    /// Returns the number of registered renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Returns true if no renderers are registered.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}
