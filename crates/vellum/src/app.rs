//! The application-facing surface.
//!
//! [`Vellum`] is what a host shell holds: it owns the dispatcher, wires
//! scheme handlers into the host's protocol-registration primitive, and
//! provides the navigation entry point that records view data before
//! pointing a window at the composed view URL.
//!
//! # Wiring order
//!
//! Protocol registration needs two things: an activated renderer and a
//! ready host. `activate_renderer` and `on_host_ready` can arrive in
//! either order; registration happens exactly once, when both have.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use vellum_dispatch::{
    error_response, DispatchConfig, DispatchError, Dispatcher, SchemeResponse, VIEW_ID_PARAM,
};
use vellum_render::RendererDescriptor;

use crate::host::{Navigator, ProtocolHost, SchemeHandler};

/// Extra knobs for a single navigation.
#[derive(Debug, Clone, Default)]
pub struct NavigateOptions {
    /// Additional query pairs appended to the composed view URL. These
    /// reach the renderer only for views whose data entry is absent.
    pub query: Vec<(String, String)>,
}

struct HostBinding {
    host: Option<Box<dyn ProtocolHost>>,
    registered: bool,
}

/// The template-serving application object.
///
/// Create one per application instance, register and activate a renderer,
/// hand the host over when it is ready, and navigate:
///
/// ```rust,ignore
/// use vellum::{Vellum, NavigateOptions};
/// use serde_json::json;
///
/// let app = Vellum::builder("app/views").assets_root("app/static").build()?;
/// app.activate_renderer("jinja")?;
/// app.on_host_ready(Box::new(shell_protocols));
/// app.navigate(&mut window, "home", json!({"title": "Hi"}), NavigateOptions::default())?;
/// ```
pub struct Vellum {
    dispatcher: Arc<Dispatcher>,
    binding: Mutex<HostBinding>,
}

impl Vellum {
    /// Starts building an application serving templates from `view_root`.
    pub fn builder(view_root: impl Into<std::path::PathBuf>) -> VellumBuilder {
        VellumBuilder {
            config: DispatchConfig::new(view_root),
            renderers: Vec::new(),
        }
    }

    /// Creates an application from a finished configuration.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(config)),
            binding: Mutex::new(HostBinding {
                host: None,
                registered: false,
            }),
        }
    }

    /// Returns the underlying dispatcher, for hosts that wire their
    /// interception mechanism by hand instead of through [`ProtocolHost`].
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Inserts or replaces a renderer descriptor.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when the name is empty.
    pub fn register_renderer(
        &self,
        name: &str,
        descriptor: RendererDescriptor,
    ) -> Result<(), DispatchError> {
        self.dispatcher.register_renderer(name, descriptor)
    }

    /// Activates the renderer registered under `name` and, when the host
    /// has already signaled readiness, performs protocol registration.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when `name` is not registered.
    pub fn activate_renderer(&self, name: &str) -> Result<(), DispatchError> {
        self.dispatcher.activate(name)?;
        self.try_register_protocols();
        Ok(())
    }

    /// Records that the host shell is ready to accept scheme registration.
    ///
    /// When a renderer is already active, registration happens now;
    /// otherwise it happens on the next successful
    /// [`activate_renderer`](Self::activate_renderer).
    pub fn on_host_ready(&self, host: Box<dyn ProtocolHost>) {
        {
            let mut binding = self.binding.lock().unwrap_or_else(PoisonError::into_inner);
            binding.host = Some(host);
        }
        if self.dispatcher.is_active() {
            self.try_register_protocols();
        }
    }

    /// Records `data` for `view_id` and points `navigator` at the composed
    /// view URL.
    ///
    /// The URL carries the reserved `_view` query key so the later request
    /// can correlate back to the entry recorded here.
    ///
    /// # Errors
    ///
    /// Serialization failure of `data`.
    pub fn navigate(
        &self,
        navigator: &mut dyn Navigator,
        view_id: &str,
        data: impl Serialize,
        options: NavigateOptions,
    ) -> Result<(), DispatchError> {
        let value = serde_json::to_value(data)?;
        self.dispatcher.put_view_data(view_id, value);

        let url = self.view_url(view_id, &options);
        tracing::debug!(url = %url, "navigating");
        navigator.load_url(&url);
        Ok(())
    }

    /// Composes the URL that [`navigate`](Self::navigate) loads.
    pub fn view_url(&self, view_id: &str, options: &NavigateOptions) -> String {
        let scheme = &self.dispatcher.config().view_scheme;
        let id = view_id.trim_start_matches('/');
        let mut url = format!("{}:///{}?{}={}", scheme, id, VIEW_ID_PARAM, id);
        for (key, value) in &options.query {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    fn try_register_protocols(&self) {
        let mut binding = self.binding.lock().unwrap_or_else(PoisonError::into_inner);
        if binding.registered || !self.dispatcher.is_active() {
            return;
        }
        let Some(host) = binding.host.as_mut() else {
            return;
        };

        let config = self.dispatcher.config();
        let view_handler = Arc::new(ViewSchemeHandler {
            dispatcher: Arc::clone(&self.dispatcher),
        });
        if !host.register_scheme(&config.view_scheme, view_handler) {
            tracing::warn!(
                scheme = %config.view_scheme,
                "host refused view scheme registration; views will not be served"
            );
        }

        if config.serves_assets() {
            let asset_handler = Arc::new(AssetSchemeHandler {
                dispatcher: Arc::clone(&self.dispatcher),
            });
            if !host.register_scheme(&config.asset_scheme, asset_handler) {
                tracing::warn!(
                    scheme = %config.asset_scheme,
                    "host refused asset scheme registration; assets will not be served"
                );
            }
        }

        binding.registered = true;
    }
}

/// Builder for [`Vellum`].
pub struct VellumBuilder {
    config: DispatchConfig,
    renderers: Vec<(String, RendererDescriptor)>,
}

impl VellumBuilder {
    /// Sets the view scheme name.
    pub fn view_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config = self.config.view_scheme(scheme);
        self
    }

    /// Sets the asset scheme name.
    pub fn asset_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config = self.config.asset_scheme(scheme);
        self
    }

    /// Enables asset serving from `root`.
    pub fn assets_root(mut self, root: impl Into<std::path::PathBuf>) -> Self {
        self.config = self.config.assets_root(root);
        self
    }

    /// Adds a suffix to the ignore list.
    pub fn ignore_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config = self.config.ignore_suffix(suffix);
        self
    }

    /// Sets the per-render timeout.
    pub fn render_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.render_timeout(timeout);
        self
    }

    /// Queues a renderer registration, applied at [`build`](Self::build).
    pub fn renderer(mut self, name: impl Into<String>, descriptor: RendererDescriptor) -> Self {
        self.renderers.push((name.into(), descriptor));
        self
    }

    /// Builds the application.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Configuration`] when a queued renderer has an
    /// empty name.
    pub fn build(self) -> Result<Vellum, DispatchError> {
        let app = Vellum::new(self.config);
        for (name, descriptor) in self.renderers {
            app.register_renderer(&name, descriptor)?;
        }
        Ok(app)
    }
}

struct ViewSchemeHandler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl SchemeHandler for ViewSchemeHandler {
    async fn handle(&self, url: &str) -> SchemeResponse {
        match self.dispatcher.dispatch(url).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url, error = %err, "view request failed");
                error_response(&err)
            }
        }
    }
}

struct AssetSchemeHandler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl SchemeHandler for AssetSchemeHandler {
    async fn handle(&self, url: &str) -> SchemeResponse {
        match self.dispatcher.resolve_asset(url) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url, error = %err, "asset request failed");
                error_response(&err)
            }
        }
    }
}
