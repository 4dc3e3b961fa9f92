//! Display + GL context management.
//!
//! This module is responsible for:
//! - the backend seams (`DisplayApi` for EGL, `GlApi` for GLES)
//! - bringing up a surface/context pair for a window, all-or-nothing
//! - releasing every handle in reverse acquisition order

mod api;
mod context;
mod error;
mod init;

#[cfg(test)]
pub(crate) mod mock;

pub use api::{ApiError, DisplayApi, GlApi, ShaderStage};
pub use context::RenderContext;
pub use error::SetupError;
pub use init::{RendererConfig, SurfaceRequest};
