use std::rc::Rc;

use bytemuck::{Pod, Zeroable};

use crate::device::{GlApi, SetupError};

/// Vertex attribute location of `Vertex::position`.
const POSITION_ATTRIBUTE: u32 = 0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3], // clip space
}

impl Vertex {
    pub const COMPONENTS: i32 = 3;
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
}

/// The triangle, centered on the origin: top, bottom-left, bottom-right.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex { position: [0.0, 0.5, 0.0] },
    Vertex { position: [-0.5, -0.5, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0] },
];

/// Vertex array + static array buffer holding uploaded vertices.
///
/// Uploaded once; never written again.
pub struct GeometryBuffer<G: GlApi> {
    gl: Rc<G>,
    vertex_array: G::VertexArray,
    buffer: G::Buffer,
    vertex_count: i32,
}

impl<G: GlApi> GeometryBuffer<G> {
    /// Uploads `vertices` and records the position attribute binding.
    pub fn upload(gl: &Rc<G>, vertices: &[Vertex]) -> Result<Self, SetupError> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(SetupError::GeometryUploadFailed)?;

        let buffer = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                gl.delete_vertex_array(vertex_array);
                return Err(SetupError::GeometryUploadFailed(e));
            }
        };

        gl.bind_vertex_array(Some(vertex_array));
        gl.bind_array_buffer(Some(buffer));
        gl.array_buffer_data_static(bytemuck::cast_slice(vertices));
        gl.vertex_attrib_f32(POSITION_ATTRIBUTE, Vertex::COMPONENTS, Vertex::STRIDE, 0);
        gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
        gl.bind_vertex_array(None);

        Ok(Self {
            gl: Rc::clone(gl),
            vertex_array,
            buffer,
            vertex_count: vertices.len() as i32,
        })
    }

    /// Issues one triangle draw using the currently bound program.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vertex_array));
        self.gl.draw_triangles(0, self.vertex_count);
        self.gl.bind_vertex_array(None);
    }

    #[cfg(test)]
    pub(crate) fn vertex_count(&self) -> i32 {
        self.vertex_count
    }
}

impl<G: GlApi> Drop for GeometryBuffer<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
        self.gl.delete_vertex_array(self.vertex_array);
    }
}
