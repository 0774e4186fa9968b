//! Protocol dispatch core for view-scheme template serving.
//!
//! `vellum-dispatch` owns the request side of the system: given a URL
//! intercepted by the host shell, it resolves a template file, correlates
//! the view data recorded at navigation time, invokes the active renderer
//! and wraps the result for the host. The design tension it resolves is
//! that requests carry no body and no call-site context — navigation-time
//! data production and request-time data consumption meet only through the
//! URL, via the reserved `_view` query key.
//!
//! # Components
//!
//! - [`resolve`]: pure URL-to-path mapping for both schemes
//! - [`ViewDataStore`]: the navigation-to-request correlation store
//! - [`Dispatcher`]: the per-request state machine
//! - [`SchemeResponse`] / [`error_response`]: what the host gets back
//! - [`DispatchConfig`]: roots, scheme names, ignore list, render timeout
//!
//! Renderer strategies come from `vellum-render`; the host-facing facade
//! lives in the `vellum` crate.

mod config;
mod dispatch;
mod error;
pub mod resolve;
mod response;
mod store;

pub use config::{DispatchConfig, DEFAULT_ASSET_SCHEME, DEFAULT_VIEW_SCHEME};
pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use resolve::VIEW_ID_PARAM;
pub use response::{error_response, SchemeResponse, HTML_MIME};
pub use store::ViewDataStore;
