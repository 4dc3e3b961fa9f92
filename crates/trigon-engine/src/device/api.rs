use raw_window_handle::RawWindowHandle;

use crate::paint::Color;

use super::SurfaceRequest;

/// Failure reported by a backend binding (EGL or GL).
///
/// Carries the binding's own description; interpretation happens in
/// [`SetupError`](super::SetupError).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ApiError(pub String);

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Shader pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// EGL-shaped display API.
///
/// Handles are plain copyable values; ownership and release ordering are
/// enforced by the guards in [`context`](super::context), not by the backend.
pub trait DisplayApi {
    type Display: Copy;
    type Config: Copy;
    type Surface: Copy;
    type Context: Copy;

    /// GL entry points for a context made current by this API.
    type Gl: GlApi;

    /// Returns the default display connection, if the platform has one.
    fn get_display(&self) -> Option<Self::Display>;

    fn initialize(&self, display: Self::Display) -> Result<(), ApiError>;

    /// Returns the first config matching `request`, or `None` if nothing matches.
    fn choose_config(
        &self,
        display: Self::Display,
        request: &SurfaceRequest,
    ) -> Result<Option<Self::Config>, ApiError>;

    fn create_window_surface(
        &self,
        display: Self::Display,
        config: Self::Config,
        window: RawWindowHandle,
    ) -> Result<Self::Surface, ApiError>;

    /// Creates a context for `api_major_version` with no share context.
    fn create_context(
        &self,
        display: Self::Display,
        config: Self::Config,
        api_major_version: u8,
    ) -> Result<Self::Context, ApiError>;

    /// Binds `target` on the calling thread; `None` unbinds.
    fn make_current(
        &self,
        display: Self::Display,
        target: Option<(Self::Surface, Self::Context)>,
    ) -> Result<(), ApiError>;

    fn swap_buffers(&self, display: Self::Display, surface: Self::Surface) -> Result<(), ApiError>;

    fn destroy_context(&self, display: Self::Display, context: Self::Context);

    fn destroy_surface(&self, display: Self::Display, surface: Self::Surface);

    fn terminate(&self, display: Self::Display);

    /// Resolves GL entry points. Only valid while a context is current.
    fn load_gl(&self) -> Self::Gl;
}

/// GLES 3-shaped API, restricted to what the triangle needs.
///
/// All methods assume the owning context is current on the calling thread.
pub trait GlApi {
    type Shader: Copy;
    type Program: Copy;
    type VertexArray: Copy;
    type Buffer: Copy;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, ApiError>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, ApiError>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, ApiError>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer, ApiError>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Uploads `data` into the bound array buffer with static-draw usage.
    fn array_buffer_data_static(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Describes float attribute `index`: `components` floats, byte `stride`, byte `offset`.
    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, index: u32);

    fn clear_color_buffer(&self, color: Color);
    fn draw_triangles(&self, first: i32, count: i32);
}
