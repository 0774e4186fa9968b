//! Dispatch configuration.
//!
//! All knobs the host application can turn live here: where templates and
//! assets sit on disk, which scheme names to claim, which file suffixes
//! bypass rendering, and how long a renderer may run before the request is
//! failed instead of left pending.

use std::path::PathBuf;
use std::time::Duration;

/// Default name for the template-serving scheme.
pub const DEFAULT_VIEW_SCHEME: &str = "view";

/// Default name for the asset-serving scheme.
pub const DEFAULT_ASSET_SCHEME: &str = "asset";

const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// Construct with [`DispatchConfig::new`] and refine with the fluent
/// setters:
///
/// ```rust
/// use std::time::Duration;
/// use vellum_dispatch::DispatchConfig;
///
/// let config = DispatchConfig::new("app/views")
///     .view_scheme("page")
///     .assets_root("app/static")
///     .ignore_suffix(".webmanifest")
///     .render_timeout(Duration::from_secs(5));
/// assert!(config.serves_assets());
/// ```
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Directory template paths resolve under.
    pub view_root: PathBuf,
    /// Scheme name claimed for view requests.
    pub view_scheme: String,
    /// Scheme name claimed for asset requests.
    pub asset_scheme: String,
    /// Directory asset paths resolve under; `None` disables asset serving.
    pub assets_root: Option<PathBuf>,
    /// File suffixes that bypass rendering with an empty successful
    /// response. Source maps are the motivating case: a broad intercepted
    /// URL space inevitably catches adjacent non-template requests from
    /// the same origin, and an empty body keeps them from surfacing
    /// template-engine errors.
    pub ignore_suffixes: Vec<String>,
    /// Upper bound on a single render. A renderer that never completes
    /// turns into a failed request instead of a permanently pending one.
    pub render_timeout: Duration,
}

impl DispatchConfig {
    /// Creates a configuration serving templates from `view_root`, with
    /// default scheme names, default ignore suffixes, and no asset serving.
    pub fn new(view_root: impl Into<PathBuf>) -> Self {
        Self {
            view_root: view_root.into(),
            view_scheme: DEFAULT_VIEW_SCHEME.to_string(),
            asset_scheme: DEFAULT_ASSET_SCHEME.to_string(),
            assets_root: None,
            ignore_suffixes: vec![".js.map".to_string(), ".css.map".to_string()],
            render_timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }

    /// Sets the view scheme name.
    pub fn view_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.view_scheme = scheme.into();
        self
    }

    /// Sets the asset scheme name.
    pub fn asset_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.asset_scheme = scheme.into();
        self
    }

    /// Enables asset serving from `root`.
    pub fn assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = Some(root.into());
        self
    }

    /// Adds a suffix to the ignore list.
    pub fn ignore_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.ignore_suffixes.push(suffix.into());
        self
    }

    /// Replaces the ignore list wholesale.
    pub fn ignore_suffixes(mut self, suffixes: impl IntoIterator<Item = String>) -> Self {
        self.ignore_suffixes = suffixes.into_iter().collect();
        self
    }

    /// Sets the per-render timeout.
    pub fn render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    /// Returns true when an assets root is configured.
    pub fn serves_assets(&self) -> bool {
        self.assets_root.is_some()
    }
}
