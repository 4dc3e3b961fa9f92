use std::rc::Rc;

use raw_window_handle::RawWindowHandle;

use crate::paint::Color;
use crate::render::{
    FRAGMENT_SHADER_SOURCE, GeometryBuffer, ShaderProgram, TRIANGLE_VERTICES, VERTEX_SHADER_SOURCE,
};

use super::{ApiError, DisplayApi, GlApi, RendererConfig, SetupError};

/// Owns the display connection, window surface, GL context and the GL objects
/// drawn with them.
///
/// A value of this type only exists fully constructed. Every handle is held by
/// a guard that releases it on drop, and the fields are declared so that drop
/// runs in reverse acquisition order:
/// - geometry and shader program are deleted while the context is still current
/// - the current binding is released
/// - context, surface and display are destroyed in that order
pub struct RenderContext<D: DisplayApi> {
    geometry: GeometryBuffer<D::Gl>,
    program: ShaderProgram<D::Gl>,
    gl: Rc<D::Gl>,
    _binding: CurrentBinding<D>,
    _context: ContextGuard<D>,
    surface: SurfaceGuard<D>,
    display: DisplayConnection<D>,
}

impl<D: DisplayApi> RenderContext<D> {
    /// Brings up a render context bound to `window`.
    ///
    /// Steps short-circuit on the first failure; whatever was acquired before
    /// it is released by the guards going out of scope.
    pub fn new(
        api: &Rc<D>,
        window: RawWindowHandle,
        config: &RendererConfig,
    ) -> Result<Self, SetupError> {
        let display = api.get_display().ok_or(SetupError::DisplayUnavailable)?;
        api.initialize(display).map_err(SetupError::DisplayInitFailed)?;
        let display = DisplayConnection {
            api: Rc::clone(api),
            display,
        };

        let egl_config = match api.choose_config(display.display, &config.surface) {
            Ok(Some(c)) => c,
            Ok(None) => return Err(SetupError::NoMatchingConfig),
            Err(e) => {
                log::error!("config query failed: {e}");
                return Err(SetupError::NoMatchingConfig);
            }
        };

        let surface = api
            .create_window_surface(display.display, egl_config, window)
            .map_err(SetupError::SurfaceCreateFailed)?;
        let surface = SurfaceGuard {
            api: Rc::clone(api),
            display: display.display,
            surface,
        };

        let context = api
            .create_context(display.display, egl_config, config.surface.api_major_version)
            .map_err(SetupError::ContextCreateFailed)?;
        let context = ContextGuard {
            api: Rc::clone(api),
            display: display.display,
            context,
        };

        api.make_current(display.display, Some((surface.surface, context.context)))
            .map_err(SetupError::MakeCurrentFailed)?;
        let binding = CurrentBinding {
            api: Rc::clone(api),
            display: display.display,
        };

        let gl = Rc::new(api.load_gl());

        let program = ShaderProgram::build(
            &gl,
            VERTEX_SHADER_SOURCE,
            FRAGMENT_SHADER_SOURCE,
            config.info_log_capacity,
        )?;

        let geometry = GeometryBuffer::upload(&gl, &TRIANGLE_VERTICES)?;

        log::info!("renderer initialized");

        Ok(Self {
            geometry,
            program,
            gl,
            _binding: binding,
            _context: context,
            surface,
            display,
        })
    }

    /// Clears to `clear`, draws the triangle once, and presents.
    pub fn draw(&self, clear: Color) -> Result<(), ApiError> {
        self.gl.clear_color_buffer(clear);
        self.program.bind();
        self.geometry.draw();

        self.display
            .api
            .swap_buffers(self.display.display, self.surface.surface)
    }

    #[cfg(test)]
    pub(crate) fn program(&self) -> &ShaderProgram<D::Gl> {
        &self.program
    }
}

/// Initialized display connection; terminated on drop.
///
/// Always the last guard to go, whether a built context is dropped or a
/// failed construction unwinds.
struct DisplayConnection<D: DisplayApi> {
    api: Rc<D>,
    display: D::Display,
}

impl<D: DisplayApi> Drop for DisplayConnection<D> {
    fn drop(&mut self) {
        self.api.terminate(self.display);
        log::info!("renderer cleaned up");
    }
}

struct SurfaceGuard<D: DisplayApi> {
    api: Rc<D>,
    display: D::Display,
    surface: D::Surface,
}

impl<D: DisplayApi> Drop for SurfaceGuard<D> {
    fn drop(&mut self) {
        self.api.destroy_surface(self.display, self.surface);
    }
}

struct ContextGuard<D: DisplayApi> {
    api: Rc<D>,
    display: D::Display,
    context: D::Context,
}

impl<D: DisplayApi> Drop for ContextGuard<D> {
    fn drop(&mut self) {
        self.api.destroy_context(self.display, self.context);
    }
}

/// Marks the surface/context pair as current on this thread.
///
/// Dropping it unbinds, which must happen before the context or surface is
/// destroyed.
struct CurrentBinding<D: DisplayApi> {
    api: Rc<D>,
    display: D::Display,
}

impl<D: DisplayApi> Drop for CurrentBinding<D> {
    fn drop(&mut self) {
        if let Err(e) = self.api.make_current(self.display, None) {
            log::warn!("failed to release current context: {e}");
        }
    }
}
