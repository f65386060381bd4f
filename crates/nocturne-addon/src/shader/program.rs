use std::fs;
use std::path::Path;

use log::debug;

use crate::gl::{GlApi, ShaderStage};

use super::error::ShaderError;

/// Callbacks a shader-program owner receives around link and enable.
pub trait ShaderHooks<G: GlApi> {
    /// Called once, immediately after a successful link, while `program` is
    /// known valid. The place to resolve attribute and uniform locations.
    fn on_compiled_and_linked(&mut self, gl: &G, program: G::Program);

    /// Per-frame enable customization. Returning `false` vetoes the enable
    /// and the program is deactivated again.
    fn on_enabled(&mut self, gl: &G) -> bool {
        let _ = gl;
        true
    }

    /// Counterpart of [`on_enabled`](Self::on_enabled), called right before
    /// the program is deactivated.
    fn on_disabled(&mut self, gl: &G) {
        let _ = gl;
    }
}

/// A vertex/fragment shader pair and its linked GL program.
///
/// The program handle is `None` until [`compile_and_link`] succeeds and
/// again after [`destroy`]; both are the only places it changes.
///
/// [`compile_and_link`]: Self::compile_and_link
/// [`destroy`]: Self::destroy
pub struct ShaderProgram<G: GlApi> {
    vert_src: String,
    frag_src: String,
    program: Option<G::Program>,
}

impl<G: GlApi> std::fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("vert_src", &self.vert_src)
            .field("frag_src", &self.frag_src)
            .field("program", &self.program)
            .finish()
    }
}

impl<G: GlApi> ShaderProgram<G> {
    /// Creates a program from in-memory sources.
    pub fn from_sources(vert_src: impl Into<String>, frag_src: impl Into<String>) -> Self {
        Self {
            vert_src: vert_src.into(),
            frag_src: frag_src.into(),
            program: None,
        }
    }

    /// Creates a program by reading both source files eagerly.
    pub fn from_files(vert_path: &Path, frag_path: &Path) -> Result<Self, ShaderError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| ShaderError::ReadSource {
                path: path.to_path_buf(),
                source,
            })
        };
        Ok(Self::from_sources(read(vert_path)?, read(frag_path)?))
    }

    /// Returns the linked program handle, if any.
    pub fn handle(&self) -> Option<G::Program> {
        self.program
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    /// Compiles both stages and links them into a fresh program.
    ///
    /// Stage objects are deleted whatever the outcome; a program that fails
    /// to link is deleted before the error is returned. On success the
    /// handle is stored and `hooks.on_compiled_and_linked` fires.
    pub fn compile_and_link(
        &mut self,
        gl: &G,
        hooks: &mut impl ShaderHooks<G>,
    ) -> Result<(), ShaderError> {
        let vs = compile_stage(gl, ShaderStage::Vertex, &self.vert_src)?;
        let fs = match compile_stage(gl, ShaderStage::Fragment, &self.frag_src) {
            Ok(fs) => fs,
            Err(err) => {
                gl.delete_shader(vs);
                return Err(err);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(ShaderError::Create(err));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link(log));
        }

        self.program = Some(program);
        debug!("shader program linked");
        hooks.on_compiled_and_linked(gl, program);
        Ok(())
    }

    /// Activates the program for the current frame.
    ///
    /// Returns `false` (with the program deactivated) when nothing is
    /// linked or the `on_enabled` hook vetoes.
    pub fn enable(&self, gl: &G, hooks: &mut impl ShaderHooks<G>) -> bool {
        let Some(program) = self.program else {
            return false;
        };
        gl.use_program(Some(program));
        if hooks.on_enabled(gl) {
            true
        } else {
            gl.use_program(None);
            false
        }
    }

    /// Deactivates the program after a draw.
    pub fn disable(&self, gl: &G, hooks: &mut impl ShaderHooks<G>) {
        if self.program.is_some() {
            hooks.on_disabled(gl);
            gl.use_program(None);
        }
    }

    /// Deletes the linked program, if any. Idempotent.
    pub fn destroy(&mut self, gl: &G) {
        if let Some(program) = self.program.take() {
            gl.delete_program(program);
        }
    }
}

fn compile_stage<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl.create_shader(stage).map_err(ShaderError::Create)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(match stage {
            ShaderStage::Vertex => ShaderError::VertexCompile(log),
            ShaderStage::Fragment => ShaderError::FragmentCompile(log),
        });
    }
    Ok(shader)
}
