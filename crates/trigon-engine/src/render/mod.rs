//! GL resources drawn each frame.
//!
//! Both resources are created once per render context and are immutable
//! afterwards. They hold an `Rc` to the GL entry points of the context that
//! created them and delete their objects on drop.

mod geometry;
mod shader;

pub use geometry::{GeometryBuffer, TRIANGLE_VERTICES, Vertex};
pub use shader::{FRAGMENT_SHADER_SOURCE, ShaderProgram, VERTEX_SHADER_SOURCE};
