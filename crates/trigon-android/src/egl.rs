use std::ffi::c_void;

use khronos_egl as egl;
use raw_window_handle::RawWindowHandle;
use trigon_engine::device::{ApiError, DisplayApi, SurfaceRequest};

use crate::gl::GlowApi;

type Egl = egl::DynamicInstance<egl::EGL1_4>;

/// `EGL_OPENGL_ES3_BIT` (EGL 1.5, or `EGL_KHR_create_context` on 1.4).
const OPENGL_ES3_BIT: egl::Int = 0x0040;

/// `DisplayApi` over the system libEGL.
pub struct EglDisplayApi {
    egl: Egl,
}

impl EglDisplayApi {
    /// Loads libEGL and resolves the 1.4 entry points.
    pub fn load() -> anyhow::Result<Self> {
        // SAFETY: libEGL is a system library whose initializers have no
        // preconditions; symbols are resolved once and kept for our lifetime.
        let egl = unsafe { Egl::load_required() }
            .map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(Self { egl })
    }
}

fn api_error(e: egl::Error) -> ApiError {
    ApiError::new(e.to_string())
}

fn renderable_bit(api_major_version: u8) -> egl::Int {
    match api_major_version {
        3.. => OPENGL_ES3_BIT,
        2 => egl::OPENGL_ES2_BIT,
        _ => egl::OPENGL_ES_BIT,
    }
}

impl DisplayApi for EglDisplayApi {
    type Display = egl::Display;
    type Config = egl::Config;
    type Surface = egl::Surface;
    type Context = egl::Context;
    type Gl = GlowApi;

    fn get_display(&self) -> Option<egl::Display> {
        // SAFETY: EGL_DEFAULT_DISPLAY is always a valid display id.
        unsafe { self.egl.get_display(egl::DEFAULT_DISPLAY) }
    }

    fn initialize(&self, display: egl::Display) -> Result<(), ApiError> {
        let (major, minor) = self.egl.initialize(display).map_err(api_error)?;
        log::info!("EGL {major}.{minor} initialized");
        Ok(())
    }

    fn choose_config(
        &self,
        display: egl::Display,
        request: &SurfaceRequest,
    ) -> Result<Option<egl::Config>, ApiError> {
        let attributes = [
            egl::RENDERABLE_TYPE,
            renderable_bit(request.api_major_version),
            egl::SURFACE_TYPE,
            egl::WINDOW_BIT,
            egl::BLUE_SIZE,
            egl::Int::from(request.blue_bits),
            egl::GREEN_SIZE,
            egl::Int::from(request.green_bits),
            egl::RED_SIZE,
            egl::Int::from(request.red_bits),
            egl::NONE,
        ];

        self.egl
            .choose_first_config(display, &attributes)
            .map_err(api_error)
    }

    fn create_window_surface(
        &self,
        display: egl::Display,
        config: egl::Config,
        window: RawWindowHandle,
    ) -> Result<egl::Surface, ApiError> {
        let RawWindowHandle::AndroidNdk(handle) = window else {
            return Err(ApiError::new(format!("unsupported window handle: {window:?}")));
        };

        // SAFETY: the platform keeps the ANativeWindow referenced until the
        // window-lost event has been handled, which destroys this surface.
        unsafe {
            self.egl.create_window_surface(
                display,
                config,
                handle.a_native_window.as_ptr() as egl::NativeWindowType,
                None,
            )
        }
        .map_err(api_error)
    }

    fn create_context(
        &self,
        display: egl::Display,
        config: egl::Config,
        api_major_version: u8,
    ) -> Result<egl::Context, ApiError> {
        let attributes = [
            egl::CONTEXT_CLIENT_VERSION,
            egl::Int::from(api_major_version),
            egl::NONE,
        ];

        self.egl
            .create_context(display, config, None, &attributes)
            .map_err(api_error)
    }

    fn make_current(
        &self,
        display: egl::Display,
        target: Option<(egl::Surface, egl::Context)>,
    ) -> Result<(), ApiError> {
        match target {
            Some((surface, context)) => {
                self.egl
                    .make_current(display, Some(surface), Some(surface), Some(context))
            }
            None => self.egl.make_current(display, None, None, None),
        }
        .map_err(api_error)
    }

    fn swap_buffers(&self, display: egl::Display, surface: egl::Surface) -> Result<(), ApiError> {
        self.egl.swap_buffers(display, surface).map_err(api_error)
    }

    fn destroy_context(&self, display: egl::Display, context: egl::Context) {
        if let Err(e) = self.egl.destroy_context(display, context) {
            log::warn!("eglDestroyContext failed: {e}");
        }
    }

    fn destroy_surface(&self, display: egl::Display, surface: egl::Surface) {
        if let Err(e) = self.egl.destroy_surface(display, surface) {
            log::warn!("eglDestroySurface failed: {e}");
        }
    }

    fn terminate(&self, display: egl::Display) {
        if let Err(e) = self.egl.terminate(display) {
            log::warn!("eglTerminate failed: {e}");
        }
    }

    fn load_gl(&self) -> GlowApi {
        // SAFETY: called right after make_current succeeded on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                self.egl
                    .get_proc_address(name)
                    .map_or(std::ptr::null(), |f| f as *const c_void)
            })
        };
        GlowApi::new(gl)
    }
}
