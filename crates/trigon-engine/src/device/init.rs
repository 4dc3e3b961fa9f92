use crate::paint::Color;

/// Surface capabilities requested from the display.
///
/// Maps to the EGL config attributes: window-presentable surface type,
/// per-channel color sizes, and the renderable client API version.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceRequest {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,

    /// Client API major version for both the config and the context.
    pub api_major_version: u8,
}

impl Default for SurfaceRequest {
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            api_major_version: 3,
        }
    }
}

/// Initialization parameters for the render context.
///
/// Keep this structure small. None of it is user-facing; it gathers the
/// constants the context and frame need in one place.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub surface: SurfaceRequest,

    /// Background color written by the per-frame clear.
    pub clear_color: Color,

    /// Maximum bytes kept from a shader or program info log.
    pub info_log_capacity: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceRequest::default(),
            clear_color: Color::rgba(0.2, 0.3, 0.3, 1.0),
            info_log_capacity: 512,
        }
    }
}
