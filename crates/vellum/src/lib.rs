//! # Vellum — template views behind custom URI schemes
//!
//! Vellum lets a desktop webview application render server-side-style
//! templates as if they were static pages. The host shell claims a custom
//! scheme (`view://` by default) through its protocol-interception
//! primitive; vellum resolves each intercepted URL to a template file,
//! renders it with the data recorded at navigation time, and hands the
//! HTML bytes back. An optional second scheme (`asset://`) maps asset URLs
//! to files on disk for the host to deliver.
//!
//! ## Core pieces
//!
//! - [`Vellum`]: the application object — renderer registration and
//!   activation, host wiring, navigation
//! - [`RendererDescriptor`] / [`ViewRenderer`]: named rendering strategies
//!   (MiniJinja is bundled and seeded as `jinja`)
//! - [`ProtocolHost`] / [`SchemeHandler`] / [`Navigator`]: the boundary the
//!   embedding shell implements
//! - [`Dispatcher`]: the per-request core, reachable through
//!   [`Vellum::dispatcher`] for hand-wired hosts
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use vellum::{NavigateOptions, Vellum};
//! use serde_json::json;
//!
//! // At startup: templates live in app/views, assets in app/static.
//! let app = Vellum::builder("app/views")
//!     .assets_root("app/static")
//!     .build()?;
//! app.activate_renderer("jinja")?;
//!
//! // When the shell is ready, hand over its protocol registrar.
//! app.on_host_ready(Box::new(shell_protocols));
//!
//! // Per navigation: record data, load view:///dashboard?_view=dashboard.
//! app.navigate(
//!     &mut window,
//!     "dashboard",
//!     json!({"user": "ada", "unread": 3}),
//!     NavigateOptions::default(),
//! )?;
//! ```
//!
//! The request that the navigation triggers arrives later, carrying only
//! the URL; the reserved `_view` query key correlates it back to the data
//! recorded above. Views that were never loaded render with undefined
//! data — that is a normal request, not an error.

mod app;
mod host;

pub use app::{NavigateOptions, Vellum, VellumBuilder};
pub use host::{Navigator, ProtocolHost, SchemeHandler};

pub use vellum_dispatch::{
    error_response, DispatchConfig, DispatchError, Dispatcher, SchemeResponse, ViewDataStore,
    DEFAULT_ASSET_SCHEME, DEFAULT_VIEW_SCHEME, HTML_MIME, VIEW_ID_PARAM,
};
pub use vellum_render::{
    MiniJinjaRenderer, RegistryError, RenderError, RendererDescriptor, RendererRegistry,
    ViewRenderer, DEFAULT_RENDERER, RESERVED_RENDERER_NAMES,
};
