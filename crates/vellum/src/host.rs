//! Host-shell boundary traits.
//!
//! Vellum never talks to a real windowing or protocol API. The embedding
//! shell implements these traits and forwards between its own primitives
//! and vellum's handlers; everything on this side stays testable with
//! in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use vellum_dispatch::SchemeResponse;

/// A request handler for one claimed scheme.
///
/// The host's interception mechanism supplies the full request URL as a
/// string and expects a [`SchemeResponse`] back. Handlers never fail at
/// this boundary: failures have already been converted into a defined
/// error payload.
#[async_trait]
pub trait SchemeHandler: Send + Sync {
    /// Produces the response for one intercepted request.
    async fn handle(&self, url: &str) -> SchemeResponse;
}

/// The host's protocol-registration primitive.
pub trait ProtocolHost {
    /// Claims `scheme`, routing its requests to `handler`.
    ///
    /// Returns `false` when the host refuses the scheme (already taken,
    /// reserved, ...). Refusal is logged by the caller and the application
    /// keeps running without that capability.
    fn register_scheme(&mut self, scheme: &str, handler: Arc<dyn SchemeHandler>) -> bool;
}

/// A window (or anything else) that can be pointed at a URL.
pub trait Navigator {
    /// Loads `url` into the target.
    fn load_url(&mut self, url: &str);
}
