//! Dispatch error taxonomy.
//!
//! Configuration-time failures (registration, activation) are synchronous
//! and fatal to the operation that caused them. Request-time failures are
//! caught per-request and surfaced as a failed response; one bad render
//! never takes down the dispatch loop.

use std::time::Duration;

use thiserror::Error;
use vellum_render::{RegistryError, RenderError};

/// Errors produced by the dispatch layer.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A request arrived before any renderer was activated. Surfaced to
    /// the caller as a failed response, never silently dropped.
    #[error("no renderer activated; call activate() before dispatching requests")]
    NotActivated,

    /// Registration-time or activation-time misconfiguration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request URL failed to parse.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The active renderer failed.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// The renderer did not complete within the configured timeout.
    #[error("render timed out after {0:?}")]
    RenderTimeout(Duration),
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Render(RenderError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_not_activated() {
        let err = DispatchError::NotActivated;
        assert!(err.to_string().contains("no renderer activated"));
    }

    #[test]
    fn test_registry_error_maps_to_configuration() {
        let err: DispatchError = RegistryError::MissingName.into();
        assert!(matches!(err, DispatchError::Configuration(_)));
        assert!(err.to_string().contains("non-empty name"));
    }

    #[test]
    fn test_render_error_passthrough() {
        let err: DispatchError = RenderError::template("bad tag").into();
        assert!(matches!(err, DispatchError::Render(_)));
        assert!(err.to_string().contains("bad tag"));
    }
}
