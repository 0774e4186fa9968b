//! The protocol dispatch state machine.
//!
//! A [`Dispatcher`] ties the resolver, the renderer registry and the
//! view-data store together. Each request flows through one pipeline:
//!
//! ```text
//! request URL
//!   → path resolution (scheme/host/query stripped, %20 decoded)
//!   → ignore-suffix check (short-circuits to an empty body)
//!   → activation check
//!   → renderer lookup + extension defaulting
//!   → view-data snapshot (via the reserved _view query key)
//!   → renderer action (async, bounded by the configured timeout)
//!   → text/html response body
//! ```
//!
//! # States
//!
//! Construction lands in `AwaitingActivation`; a successful
//! [`Dispatcher::activate`] moves to `Active`, which is terminal — there is
//! no deactivation path. Requests before activation fail with
//! [`DispatchError::NotActivated`]. The ignore-suffix short-circuit is the
//! one exception: it answers in any state, since it needs no renderer.
//!
//! # Locking
//!
//! Registry, store and state sit behind `RwLock`s that are only held in the
//! synchronous sections of a request; everything a render needs is cloned
//! out before the action is awaited. This is also what pins down the
//! put-versus-in-flight-render race: a request renders with the data
//! snapshot taken at its synchronous read step, and a `put` landing during
//! the render affects only later requests.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use url::Url;
use vellum_render::{RendererDescriptor, RendererRegistry, ViewRenderer};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::resolve;
use crate::response::SchemeResponse;
use crate::store::ViewDataStore;

#[derive(Debug, Clone, PartialEq, Eq)]
enum DispatcherState {
    AwaitingActivation,
    Active { renderer: String },
}

/// The protocol dispatch core.
///
/// One instance per application; created with the application and torn
/// down with it. All methods take `&self`, so hosts can share the
/// dispatcher behind an `Arc` between the navigation side and the
/// interception side.
pub struct Dispatcher {
    config: DispatchConfig,
    registry: RwLock<RendererRegistry>,
    store: RwLock<ViewDataStore>,
    state: RwLock<DispatcherState>,
}

impl Dispatcher {
    /// Creates a dispatcher with the built-in renderers seeded.
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_registry(config, RendererRegistry::with_builtins())
    }

    /// Creates a dispatcher over a caller-assembled registry.
    pub fn with_registry(config: DispatchConfig, registry: RendererRegistry) -> Self {
        Self {
            config,
            registry: RwLock::new(registry),
            store: RwLock::new(ViewDataStore::new()),
            state: RwLock::new(DispatcherState::AwaitingActivation),
        }
    }

    /// Returns the dispatch configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Inserts or replaces a renderer descriptor.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when `name` is empty.
    pub fn register_renderer(
        &self,
        name: &str,
        descriptor: RendererDescriptor,
    ) -> Result<(), DispatchError> {
        write_lock(&self.registry).register(name, descriptor)?;
        Ok(())
    }

    /// Activates the renderer registered under `name`.
    ///
    /// Requests can only succeed after activation. Activation is terminal:
    /// a later `activate` may switch renderers, but there is no way back to
    /// the unactivated state.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when no descriptor is registered
    /// under `name`.
    pub fn activate(&self, name: &str) -> Result<(), DispatchError> {
        if !read_lock(&self.registry).contains(name) {
            return Err(DispatchError::Configuration(format!(
                "cannot activate unregistered renderer \"{}\"",
                name
            )));
        }
        *write_lock(&self.state) = DispatcherState::Active {
            renderer: name.to_string(),
        };
        tracing::debug!(renderer = name, "renderer activated");
        Ok(())
    }

    /// Returns true once a renderer has been activated.
    pub fn is_active(&self) -> bool {
        matches!(*read_lock(&self.state), DispatcherState::Active { .. })
    }

    /// Returns the active renderer's name, if any.
    pub fn active_renderer(&self) -> Option<String> {
        match &*read_lock(&self.state) {
            DispatcherState::Active { renderer } => Some(renderer.clone()),
            DispatcherState::AwaitingActivation => None,
        }
    }

    /// Records view data under `view_id` (unconditional upsert).
    pub fn put_view_data(&self, view_id: impl Into<String>, data: serde_json::Value) {
        write_lock(&self.store).put(view_id, data);
    }

    /// Returns a copy of the view data recorded under `view_id`.
    pub fn view_data(&self, view_id: &str) -> Option<serde_json::Value> {
        read_lock(&self.store).snapshot(view_id)
    }

    /// Returns the number of view-data entries recorded so far.
    pub fn view_data_len(&self) -> usize {
        read_lock(&self.store).len()
    }

    /// Handles one view-scheme request.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidUrl`] when the URL fails to parse
    /// - [`DispatchError::NotActivated`] before any [`activate`](Self::activate)
    /// - [`DispatchError::Render`] when the renderer fails
    /// - [`DispatchError::RenderTimeout`] when it never completes
    pub async fn dispatch(&self, url_str: &str) -> Result<SchemeResponse, DispatchError> {
        let url = Url::parse(url_str)?;
        let resolved = self.config.view_root.join(resolve::view_path(&url));

        // Ignored suffixes answer in any state: the empty body suppresses
        // template-engine interference with non-template files served
        // through the same scheme, activated or not.
        if self.is_ignored(&resolved) {
            tracing::debug!(url = url_str, "ignore-suffix match, returning empty body");
            return Ok(SchemeResponse::empty_html());
        }

        let renderer_name = self.active_renderer().ok_or(DispatchError::NotActivated)?;
        let (candidate, action) = {
            let registry = read_lock(&self.registry);
            let descriptor = registry.get(&renderer_name).ok_or_else(|| {
                DispatchError::Configuration(format!(
                    "active renderer \"{}\" is no longer registered",
                    renderer_name
                ))
            })?;
            (
                with_extension(resolved, &descriptor.effective_extension(&renderer_name)),
                descriptor.action(),
            )
        };

        // Stored data supersedes raw query parameters; a _view id that was
        // never loaded renders with no data rather than failing.
        let data = match resolve::view_id(&url) {
            Some(view_id) => read_lock(&self.store).snapshot(&view_id),
            None => resolve::query_data(&url),
        };

        let rendered = render_bounded(action, candidate, data, &self.config).await?;
        Ok(SchemeResponse::html(rendered))
    }

    /// Handles one asset-scheme request.
    ///
    /// Computes the absolute file path only; the host's file-delivery
    /// mechanism performs the byte transfer and owns not-found handling.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when no assets root is configured,
    /// [`DispatchError::InvalidUrl`] on a malformed URL.
    pub fn resolve_asset(&self, url_str: &str) -> Result<SchemeResponse, DispatchError> {
        let root = self.config.assets_root.as_deref().ok_or_else(|| {
            DispatchError::Configuration(
                "asset request received but no assets root is configured".to_string(),
            )
        })?;
        let url = Url::parse(url_str)?;
        Ok(SchemeResponse::Path(resolve::asset_path(&url, root)))
    }

    fn is_ignored(&self, resolved: &Path) -> bool {
        let path = resolved.to_string_lossy();
        self.config
            .ignore_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }
}

/// Appends a renderer extension to an already-composed path.
fn with_extension(path: PathBuf, extension: &str) -> PathBuf {
    let mut os = path.into_os_string();
    os.push(extension);
    PathBuf::from(os)
}

/// Runs the renderer action under the configured timeout.
///
/// No synchronous lock is held across this await; everything the render
/// needs was cloned out beforehand.
async fn render_bounded(
    action: std::sync::Arc<dyn ViewRenderer>,
    candidate: PathBuf,
    data: Option<serde_json::Value>,
    config: &DispatchConfig,
) -> Result<String, DispatchError> {
    match tokio::time::timeout(config.render_timeout, action.render(&candidate, data)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(DispatchError::RenderTimeout(config.render_timeout)),
    }
}

// Lock poisoning means a writer panicked mid-update; the data here is
// plain maps and an enum, so recover the guard rather than poisoning every
// later request.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
