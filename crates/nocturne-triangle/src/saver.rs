use anyhow::{Result, anyhow};
use log::warn;

use nocturne_addon::addon::{AddonInfo, Screensaver};
use nocturne_addon::gl::{BufferUsage, GlApi};
use nocturne_addon::shader::{ShaderHooks, ShaderProgram};

use crate::vertex::{PackedVertex, TRIANGLE};

/// Attribute locations cached at link time.
///
/// A location is `None` when the shader dropped the attribute (source typo,
/// or optimized out as unused); `render` skips that binding and says so
/// once instead of binding an invalid location.
#[derive(Debug, Default)]
struct TriangleAttribs {
    position: Option<u32>,
    color: Option<u32>,
    warned_missing: bool,
}

impl<G: GlApi> ShaderHooks<G> for TriangleAttribs {
    fn on_compiled_and_linked(&mut self, gl: &G, program: G::Program) {
        self.position = gl.attrib_location(program, "a_position");
        self.color = gl.attrib_location(program, "a_color");
        self.warned_missing = false;
    }
}

/// The triangle screensaver.
///
/// Holds exactly one vertex buffer and one shader program between `start`
/// and `stop`; the triangle itself is constant and re-uploaded in full each
/// frame rather than persisted.
pub struct TriangleSaver<G: GlApi> {
    program: Option<ShaderProgram<G>>,
    vbo: Option<G::Buffer>,
    attribs: TriangleAttribs,
}

impl<G: GlApi> TriangleSaver<G> {
    pub fn new() -> Self {
        Self {
            program: None,
            vbo: None,
            attribs: TriangleAttribs::default(),
        }
    }

    fn bind_attrib(gl: &G, location: Option<u32>, components: i32, offset: i32) -> bool {
        let Some(location) = location else {
            return false;
        };
        gl.vertex_attrib_pointer_f32(location, components, PackedVertex::STRIDE, offset);
        gl.enable_vertex_attrib_array(location);
        true
    }
}

impl<G: GlApi> Default for TriangleSaver<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GlApi> Screensaver<G> for TriangleSaver<G> {
    fn start(&mut self, gl: &G, addon: &AddonInfo) -> Result<()> {
        let vert_path = addon.shader_path("glsl.vert");
        let frag_path = addon.shader_path("glsl.frag");

        let mut program = ShaderProgram::from_files(&vert_path, &frag_path)?;
        program.compile_and_link(gl, &mut self.attribs)?;

        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                program.destroy(gl);
                return Err(anyhow!("failed to allocate vertex buffer: {err}"));
            }
        };

        self.program = Some(program);
        self.vbo = Some(vbo);
        Ok(())
    }

    fn stop(&mut self, gl: &G) {
        if let Some(vbo) = self.vbo.take() {
            gl.delete_buffer(vbo);
        }
        if let Some(mut program) = self.program.take() {
            program.destroy(gl);
        }
        self.attribs = TriangleAttribs::default();
    }

    fn render(&mut self, gl: &G) {
        let Some(program) = self.program.as_ref() else {
            return;
        };
        let Some(vbo) = self.vbo else {
            return;
        };

        gl.bind_array_buffer(Some(vbo));
        gl.array_buffer_data(bytemuck::cast_slice(&TRIANGLE), BufferUsage::StaticDraw);

        let bound_position = Self::bind_attrib(
            gl,
            self.attribs.position,
            PackedVertex::POSITION_COMPONENTS,
            PackedVertex::POSITION_OFFSET,
        );
        let bound_color = Self::bind_attrib(
            gl,
            self.attribs.color,
            PackedVertex::COLOR_COMPONENTS,
            PackedVertex::COLOR_OFFSET,
        );
        if (!bound_position || !bound_color) && !self.attribs.warned_missing {
            warn!("shader dropped a vertex attribute; skipping its binding");
            self.attribs.warned_missing = true;
        }

        if program.enable(gl, &mut self.attribs) {
            gl.draw_triangle_arrays(0, TRIANGLE.len() as i32);
            program.disable(gl, &mut self.attribs);
        }

        if let Some(location) = self.attribs.position {
            gl.disable_vertex_attrib_array(location);
        }
        if let Some(location) = self.attribs.color {
            gl.disable_vertex_attrib_array(location);
        }
        gl.bind_array_buffer(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nocturne_addon::addon::GlBackend;
    use nocturne_addon::gl::ShaderStage;
    use nocturne_addon::gl::recording::{GlCall, RecordingGl};

    fn addon_info() -> AddonInfo {
        AddonInfo::new(env!("CARGO_MANIFEST_DIR"), GlBackend::Gl)
    }

    fn started(gl: &RecordingGl) -> TriangleSaver<RecordingGl> {
        let mut saver = TriangleSaver::new();
        saver.start(gl, &addon_info()).unwrap();
        saver
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn start_then_stop_releases_the_one_buffer() {
        let gl = RecordingGl::new();
        let mut saver = started(&gl);
        assert_eq!(gl.created_buffers(), 1);
        assert!(saver.vbo.is_some());

        saver.stop(&gl);

        assert_eq!(gl.deleted_buffers(), 1);
        assert_eq!(gl.live_buffers(), 0);
        assert!(saver.vbo.is_none());
        assert!(saver.program.is_none());
        assert_eq!(gl.live_programs(), 0);
    }

    #[test]
    fn stop_without_start_is_harmless() {
        let gl = RecordingGl::new();
        let mut saver = TriangleSaver::new();

        saver.stop(&gl);
        saver.stop(&gl);

        assert!(saver.vbo.is_none());
        assert_eq!(gl.deleted_buffers(), 0);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn gles_shader_pair_also_starts() {
        let gl = RecordingGl::new();
        let mut saver = TriangleSaver::new();
        let addon = AddonInfo::new(env!("CARGO_MANIFEST_DIR"), GlBackend::Gles);

        saver.start(&gl, &addon).unwrap();

        assert_eq!(gl.created_buffers(), 1);
    }

    #[test]
    fn missing_shader_files_fail_start_without_allocating() {
        let gl = RecordingGl::new();
        let mut saver = TriangleSaver::new();
        let addon = AddonInfo::new("/nonexistent/install/root", GlBackend::Gl);

        assert!(saver.start(&gl, &addon).is_err());

        assert_eq!(gl.created_buffers(), 0);
        assert!(saver.vbo.is_none());
    }

    #[test]
    fn compile_failure_fails_start_without_allocating() {
        let gl = RecordingGl::new();
        gl.force_compile_failure(ShaderStage::Fragment);
        let mut saver = TriangleSaver::new();

        assert!(saver.start(&gl, &addon_info()).is_err());

        assert_eq!(gl.created_buffers(), 0);
        assert_eq!(gl.live_programs(), 0);
        assert!(saver.vbo.is_none());
    }

    #[test]
    fn link_failure_fails_start_without_allocating() {
        let gl = RecordingGl::new();
        gl.force_link_failure();
        let mut saver = TriangleSaver::new();

        assert!(saver.start(&gl, &addon_info()).is_err());

        assert_eq!(gl.created_buffers(), 0);
        assert_eq!(gl.live_programs(), 0);
    }

    // ── attribute resolution ──────────────────────────────────────────────

    #[test]
    fn link_resolves_both_attributes() {
        let gl = RecordingGl::new();
        let saver = started(&gl);

        assert!(saver.attribs.position.is_some());
        assert!(saver.attribs.color.is_some());
        assert_ne!(saver.attribs.position, saver.attribs.color);
    }

    #[test]
    fn withheld_attribute_is_skipped_but_frame_still_draws() {
        let gl = RecordingGl::new();
        gl.withhold_attrib("a_color");
        let mut saver = started(&gl);
        assert!(saver.attribs.color.is_none());
        gl.take_calls();

        saver.render(&gl);

        let calls = gl.take_calls();
        let pointer_binds = calls
            .iter()
            .filter(|c| matches!(c, GlCall::VertexAttribPointer { .. }))
            .count();
        let draws = calls
            .iter()
            .filter(|c| matches!(c, GlCall::DrawTriangleArrays { .. }))
            .count();
        assert_eq!(pointer_binds, 1);
        assert_eq!(draws, 1);
    }

    // ── per-frame behavior ────────────────────────────────────────────────

    #[test]
    fn render_uploads_the_three_vertices_and_draws_once() {
        let gl = RecordingGl::new();
        let mut saver = started(&gl);
        gl.take_calls();

        saver.render(&gl);

        let calls = gl.take_calls();

        let expected = [
            PackedVertex { position: [-0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0, 1.0] },
            PackedVertex { position: [0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0, 1.0] },
            PackedVertex { position: [0.0, 0.5, 0.0], color: [0.0, 0.0, 1.0, 1.0] },
        ];
        let uploads: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                GlCall::ArrayBufferData { bytes, usage } => Some((bytes, usage)),
                _ => None,
            })
            .collect();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0.as_slice(), bytemuck::cast_slice::<_, u8>(&expected));
        assert_eq!(*uploads[0].1, BufferUsage::StaticDraw);

        let draws: Vec<_> = calls
            .iter()
            .filter(|c| matches!(c, GlCall::DrawTriangleArrays { .. }))
            .collect();
        assert_eq!(draws, vec![&GlCall::DrawTriangleArrays { first: 0, count: 3 }]);
    }

    #[test]
    fn render_binds_attribs_with_packed_layout() {
        let gl = RecordingGl::new();
        let mut saver = started(&gl);
        let position = saver.attribs.position.unwrap();
        let color = saver.attribs.color.unwrap();
        gl.take_calls();

        saver.render(&gl);

        let calls = gl.take_calls();
        assert!(calls.contains(&GlCall::VertexAttribPointer {
            location: position,
            components: 3,
            stride: 28,
            offset: 0,
        }));
        assert!(calls.contains(&GlCall::VertexAttribPointer {
            location: color,
            components: 4,
            stride: 28,
            offset: 12,
        }));
        assert!(calls.contains(&GlCall::EnableVertexAttribArray(position)));
        assert!(calls.contains(&GlCall::EnableVertexAttribArray(color)));
    }

    #[test]
    fn render_wraps_the_draw_in_the_shader() {
        let gl = RecordingGl::new();
        let mut saver = started(&gl);
        let handle = saver.program.as_ref().unwrap().handle();
        gl.take_calls();

        saver.render(&gl);

        let relevant: Vec<_> = gl
            .take_calls()
            .into_iter()
            .filter(|c| {
                matches!(c, GlCall::UseProgram(_) | GlCall::DrawTriangleArrays { .. })
            })
            .collect();
        assert_eq!(
            relevant,
            vec![
                GlCall::UseProgram(handle),
                GlCall::DrawTriangleArrays { first: 0, count: 3 },
                GlCall::UseProgram(None),
            ]
        );
    }

    #[test]
    fn render_before_start_does_nothing() {
        let gl = RecordingGl::new();
        let mut saver = TriangleSaver::<RecordingGl>::new();

        saver.render(&gl);

        assert!(gl.calls().is_empty());
    }

    #[test]
    fn ten_frames_do_not_leak_buffers() {
        let gl = RecordingGl::new();
        let mut saver = started(&gl);

        for _ in 0..10 {
            saver.render(&gl);
        }
        saver.stop(&gl);

        assert_eq!(gl.created_buffers(), 1);
        assert_eq!(gl.deleted_buffers(), 1);
        assert_eq!(gl.live_buffers(), 0);
        assert_eq!(gl.draw_count(), 10);
    }
}
