use std::rc::Rc;

use crate::device::{GlApi, SetupError, ShaderStage};

/// Pass-through vertex shader: attribute 0 is the clip-space position.
pub const VERTEX_SHADER_SOURCE: &str = r#"#version 320 es
layout(location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
"#;

/// Solid white fragment shader.
pub const FRAGMENT_SHADER_SOURCE: &str = r#"#version 320 es
precision mediump float;
out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 1.0, 1.0, 1.0);
}
"#;

/// Linked vertex + fragment program; deleted on drop.
pub struct ShaderProgram<G: GlApi> {
    gl: Rc<G>,
    program: G::Program,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Compiles both stages and links them.
    ///
    /// Info logs are cut to `log_capacity` bytes. Shader objects are deleted
    /// once the link has been attempted, and on every failure path before it.
    pub fn build(
        gl: &Rc<G>,
        vertex_source: &str,
        fragment_source: &str,
        log_capacity: usize,
    ) -> Result<Self, SetupError> {
        let vertex = compile_stage(&**gl, ShaderStage::Vertex, vertex_source, log_capacity)?;
        let fragment = compile_stage(&**gl, ShaderStage::Fragment, fragment_source, log_capacity)?;

        let program = gl
            .create_program()
            .map_err(|e| SetupError::ProgramLinkFailed { log: e.to_string() })?;
        let program = Self {
            gl: Rc::clone(gl),
            program,
        };

        gl.attach_shader(program.program, vertex.shader);
        gl.attach_shader(program.program, fragment.shader);
        gl.link_program(program.program);

        drop(vertex);
        drop(fragment);

        if !gl.program_link_status(program.program) {
            let log = truncate_info_log(gl.program_info_log(program.program), log_capacity);
            log::error!("program link error: {log}");
            return Err(SetupError::ProgramLinkFailed { log });
        }

        Ok(program)
    }

    /// Makes this program current for subsequent draws.
    pub fn bind(&self) {
        self.gl.use_program(Some(self.program));
    }

    #[cfg(test)]
    pub(crate) fn handle(&self) -> G::Program {
        self.program
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
    }
}

/// Compiled shader object, deleted when it goes out of scope.
struct CompiledShader<'a, G: GlApi> {
    gl: &'a G,
    shader: G::Shader,
}

impl<G: GlApi> Drop for CompiledShader<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.shader);
    }
}

fn compile_stage<'a, G: GlApi>(
    gl: &'a G,
    stage: ShaderStage,
    source: &str,
    log_capacity: usize,
) -> Result<CompiledShader<'a, G>, SetupError> {
    let shader = gl
        .create_shader(stage)
        .map_err(|e| SetupError::ShaderCompileFailed {
            stage,
            log: e.to_string(),
        })?;
    let shader = CompiledShader { gl, shader };

    gl.shader_source(shader.shader, source);
    gl.compile_shader(shader.shader);

    if !gl.shader_compile_status(shader.shader) {
        let log = truncate_info_log(gl.shader_info_log(shader.shader), log_capacity);
        log::error!("{stage} shader compilation error: {log}");
        return Err(SetupError::ShaderCompileFailed { stage, log });
    }

    Ok(shader)
}

/// Cuts `log` to at most `capacity` bytes on a char boundary and strips
/// trailing NULs and whitespace left by fixed-size driver buffers.
fn truncate_info_log(mut log: String, capacity: usize) -> String {
    if log.len() > capacity {
        let mut end = capacity;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }

    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace()).len();
    log.truncate(trimmed);
    log
}
