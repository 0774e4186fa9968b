//! Renderer abstraction and registry for view-scheme template rendering.
//!
//! `vellum-render` defines how templates become HTML, independent of how
//! requests reach them:
//!
//! - [`ViewRenderer`]: the asynchronous action contract (template file +
//!   optional view data → HTML)
//! - [`RendererDescriptor`]: a named strategy pairing an action with the
//!   file extension its templates use
//! - [`RendererRegistry`]: the name-keyed descriptor store, seeded with the
//!   bundled MiniJinja backend
//! - [`RenderError`]: the uniform failure type across backends
//!
//! The dispatch layer (`vellum-dispatch`) consumes these types; host
//! applications touch this crate only to register custom renderers.

mod engine;
mod error;
mod registry;

pub use engine::{MiniJinjaRenderer, ViewRenderer};
pub use error::RenderError;
pub use registry::{
    RegistryError, RendererDescriptor, RendererRegistry, DEFAULT_RENDERER,
    RESERVED_RENDERER_NAMES,
};
