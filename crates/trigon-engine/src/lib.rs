//! Trigon engine crate.
//!
//! Platform-agnostic core of the triangle demo: the window-lifecycle state
//! machine, the EGL/GLES render context it owns, and the frame loop. Real
//! backends plug in through the `DisplayApi`, `GlApi` and `Platform` traits.

pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;

pub use device::{DisplayApi, GlApi, RenderContext, RendererConfig, SetupError};
pub use window::{LifecycleController, Platform, PlatformEvent, Runtime};
