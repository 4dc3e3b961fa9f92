//! Recording backend for tests.
//!
//! Implements both seam traits over one shared recorder so a test can inject
//! a failure at any step, inspect the call sequence, and check that no handle
//! outlives its owner.

use std::cell::RefCell;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::rc::Rc;

use raw_window_handle::{AndroidNdkWindowHandle, RawWindowHandle};

use crate::paint::Color;

use super::{ApiError, DisplayApi, GlApi, ShaderStage, SurfaceRequest};

/// Where the mock should report failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum FailPoint {
    GetDisplay,
    Initialize,
    ChooseConfig,
    NoConfig,
    CreateSurface,
    CreateContext,
    MakeCurrent,
    CompileVertex,
    CompileFragment,
    LinkProgram,
    CreateBuffer,
    SwapBuffers,
}

/// Kinds of handle the mock tracks as live.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Resource {
    Display,
    Surface,
    Context,
    Binding,
    Shader,
    Program,
    VertexArray,
    Buffer,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    GetDisplay,
    Initialize(u32),
    ChooseConfig,
    CreateSurface(u32),
    CreateContext(u32),
    MakeCurrent(Option<(u32, u32)>),
    SwapBuffers(u32),
    DestroyContext(u32),
    DestroySurface(u32),
    Terminate(u32),
    LoadGl,
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData(usize),
    DeleteBuffer(u32),
    VertexAttrib { index: u32, components: i32, stride: i32, offset: i32 },
    EnableVertexAttrib(u32),
    Clear([f32; 4]),
    DrawTriangles(i32, i32),
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    next_id: u32,
    live: Vec<(Resource, u32)>,
    fail: Option<FailPoint>,
    info_log: String,
    shaders: Vec<(u32, ShaderStage)>,
    sources: Vec<(ShaderStage, String)>,
    uploaded: Vec<u8>,
    api_version: Option<u8>,
}

impl Recorder {
    fn alloc(&mut self, kind: Resource) -> u32 {
        self.next_id += 1;
        self.live.push((kind, self.next_id));
        self.next_id
    }

    fn release(&mut self, kind: Resource, id: u32) {
        let before = self.live.len();
        self.live.retain(|&(k, i)| !(k == kind && i == id));
        assert_eq!(before, self.live.len() + 1, "released {kind:?} {id} that was not live");
    }

    fn fails_at(&self, point: FailPoint) -> bool {
        self.fail == Some(point)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockBackend {
    state: Rc<RefCell<Recorder>>,
}

impl MockBackend {
    pub(crate) fn failing_at(point: FailPoint) -> Self {
        let mock = Self::default();
        mock.set_failure(Some(point));
        mock
    }

    pub(crate) fn set_failure(&self, point: Option<FailPoint>) {
        self.state.borrow_mut().fail = point;
    }

    pub(crate) fn set_info_log(&self, log: &str) {
        self.state.borrow_mut().info_log = log.to_string();
    }

    /// GL entry points sharing this recorder, without a display.
    pub(crate) fn gl(&self) -> MockGl {
        MockGl {
            state: Rc::clone(&self.state),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn live(&self) -> Vec<(Resource, u32)> {
        self.state.borrow().live.clone()
    }

    pub(crate) fn shader_sources(&self) -> Vec<(ShaderStage, String)> {
        self.state.borrow().sources.clone()
    }

    pub(crate) fn requested_api_version(&self) -> Option<u8> {
        self.state.borrow().api_version
    }

    /// Last upload, decoded back into xyz triples.
    pub(crate) fn uploaded_vertices(&self) -> Vec<[f32; 3]> {
        let state = self.state.borrow();
        let floats: Vec<f32> = state
            .uploaded
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        floats.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
    }
}

/// A window handle the mock never dereferences.
pub(crate) fn window() -> RawWindowHandle {
    RawWindowHandle::AndroidNdk(AndroidNdkWindowHandle::new(NonNull::<c_void>::dangling()))
}

impl DisplayApi for MockBackend {
    type Display = u32;
    type Config = u32;
    type Surface = u32;
    type Context = u32;
    type Gl = MockGl;

    fn get_display(&self) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::GetDisplay);
        if s.fails_at(FailPoint::GetDisplay) {
            return None;
        }
        s.next_id += 1;
        Some(s.next_id)
    }

    fn initialize(&self, display: u32) -> Result<(), ApiError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Initialize(display));
        if s.fails_at(FailPoint::Initialize) {
            return Err(ApiError::new("EGL_NOT_INITIALIZED"));
        }
        s.live.push((Resource::Display, display));
        Ok(())
    }

    fn choose_config(
        &self,
        _display: u32,
        request: &SurfaceRequest,
    ) -> Result<Option<u32>, ApiError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::ChooseConfig);
        if s.fails_at(FailPoint::ChooseConfig) {
            return Err(ApiError::new("EGL_BAD_ATTRIBUTE"));
        }
        if s.fails_at(FailPoint::NoConfig) {
            return Ok(None);
        }
        Ok(Some(u32::from(request.api_major_version)))
    }

    fn create_window_surface(
        &self,
        _display: u32,
        _config: u32,
        _window: RawWindowHandle,
    ) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        if s.fails_at(FailPoint::CreateSurface) {
            return Err(ApiError::new("EGL_BAD_NATIVE_WINDOW"));
        }
        let id = s.alloc(Resource::Surface);
        s.calls.push(Call::CreateSurface(id));
        Ok(id)
    }

    fn create_context(
        &self,
        _display: u32,
        _config: u32,
        api_major_version: u8,
    ) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        s.api_version = Some(api_major_version);
        if s.fails_at(FailPoint::CreateContext) {
            return Err(ApiError::new("EGL_BAD_CONFIG"));
        }
        let id = s.alloc(Resource::Context);
        s.calls.push(Call::CreateContext(id));
        Ok(id)
    }

    fn make_current(&self, _display: u32, target: Option<(u32, u32)>) -> Result<(), ApiError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::MakeCurrent(target));
        match target {
            Some(_) if s.fails_at(FailPoint::MakeCurrent) => {
                Err(ApiError::new("EGL_BAD_MATCH"))
            }
            Some(_) => {
                s.live.push((Resource::Binding, 0));
                Ok(())
            }
            None => {
                s.release(Resource::Binding, 0);
                Ok(())
            }
        }
    }

    fn swap_buffers(&self, _display: u32, surface: u32) -> Result<(), ApiError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::SwapBuffers(surface));
        if s.fails_at(FailPoint::SwapBuffers) {
            return Err(ApiError::new("EGL_BAD_SURFACE"));
        }
        Ok(())
    }

    fn destroy_context(&self, _display: u32, context: u32) {
        let mut s = self.state.borrow_mut();
        assert!(
            !s.live.iter().any(|(k, _)| *k == Resource::Binding),
            "context destroyed while still current"
        );
        s.calls.push(Call::DestroyContext(context));
        s.release(Resource::Context, context);
    }

    fn destroy_surface(&self, _display: u32, surface: u32) {
        let mut s = self.state.borrow_mut();
        assert!(
            !s.live.iter().any(|(k, _)| *k == Resource::Binding),
            "surface destroyed while still current"
        );
        s.calls.push(Call::DestroySurface(surface));
        s.release(Resource::Surface, surface);
    }

    fn terminate(&self, display: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Terminate(display));
        s.release(Resource::Display, display);
    }

    fn load_gl(&self) -> MockGl {
        self.state.borrow_mut().calls.push(Call::LoadGl);
        self.gl()
    }
}

#[derive(Debug)]
pub(crate) struct MockGl {
    state: Rc<RefCell<Recorder>>,
}

impl GlApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type VertexArray = u32;
    type Buffer = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc(Resource::Shader);
        s.shaders.push((id, stage));
        s.calls.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut s = self.state.borrow_mut();
        let stage = s
            .shaders
            .iter()
            .find(|(id, _)| *id == shader)
            .map(|(_, stage)| *stage)
            .expect("source for unknown shader");
        s.sources.push((stage, source.to_string()));
    }

    fn compile_shader(&self, shader: u32) {
        self.state.borrow_mut().calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let s = self.state.borrow();
        let stage = s.shaders.iter().find(|(id, _)| *id == shader).map(|(_, st)| *st);
        !matches!(
            (stage, s.fail),
            (Some(ShaderStage::Vertex), Some(FailPoint::CompileVertex))
                | (Some(ShaderStage::Fragment), Some(FailPoint::CompileFragment))
        )
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        self.state.borrow().info_log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::DeleteShader(shader));
        s.release(Resource::Shader, shader);
    }

    fn create_program(&self) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc(Resource::Program);
        s.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.state.borrow_mut().calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.state.borrow().fails_at(FailPoint::LinkProgram)
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.state.borrow().info_log.clone()
    }

    fn use_program(&self, program: Option<u32>) {
        self.state.borrow_mut().calls.push(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::DeleteProgram(program));
        s.release(Resource::Program, program);
    }

    fn create_vertex_array(&self) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc(Resource::VertexArray);
        s.calls.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::DeleteVertexArray(vertex_array));
        s.release(Resource::VertexArray, vertex_array);
    }

    fn create_buffer(&self) -> Result<u32, ApiError> {
        let mut s = self.state.borrow_mut();
        if s.fails_at(FailPoint::CreateBuffer) {
            return Err(ApiError::new("GL_OUT_OF_MEMORY"));
        }
        let id = s.alloc(Resource::Buffer);
        s.calls.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::BufferData(data.len()));
        s.uploaded = data.to_vec();
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::DeleteBuffer(buffer));
        s.release(Resource::Buffer, buffer);
    }

    fn vertex_attrib_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.state.borrow_mut().calls.push(Call::VertexAttrib {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::EnableVertexAttrib(index));
    }

    fn clear_color_buffer(&self, color: Color) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::Clear(color.to_array()));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::DrawTriangles(first, count));
    }
}
