//! Window lifecycle + frame loop.
//!
//! Owns the render context state machine and drives it from platform events.

mod lifecycle;
mod platform;
mod runtime;

pub use lifecycle::{FrameStats, LifecycleController};
pub use platform::{Platform, PlatformEvent};
pub use runtime::Runtime;
