//! Headless command-recording GL backend.
//!
//! [`RecordingGl`] implements [`GlApi`] without touching a GPU: every call
//! is appended to a command log and object lifetimes are tracked, so a host
//! (or a test) can run a full screensaver lifecycle and assert on what was
//! submitted. Failure knobs simulate the compile/link errors a real driver
//! can produce and the attribute drop-out a real compiler can perform.
//!
//! Single-threaded by contract, like the callbacks themselves; state lives
//! behind a `RefCell`.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::api::{BufferUsage, GlApi, ShaderStage};

/// One recorded GL command.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData { bytes: Vec<u8>, usage: BufferUsage },
    VertexAttribPointer { location: u32, components: i32, stride: i32, offset: i32 },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    DrawTriangleArrays { first: i32, count: i32 },
    CreateShader { stage: ShaderStage, shader: u32 },
    ShaderSource { shader: u32 },
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    AttribLocation { program: u32, name: String },
}

#[derive(Default)]
struct State {
    next_id: u32,
    calls: Vec<GlCall>,

    live_buffers: BTreeSet<u32>,
    live_shaders: BTreeSet<u32>,
    live_programs: BTreeSet<u32>,
    shader_stages: BTreeMap<u32, ShaderStage>,

    created_buffers: usize,
    deleted_buffers: usize,

    failing_stage: Option<ShaderStage>,
    failing_link: bool,
    withheld_attribs: BTreeSet<String>,
    attrib_locations: BTreeMap<String, u32>,
    next_attrib: u32,
}

impl State {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording [`GlApi`] backend.
#[derive(Default)]
pub struct RecordingGl {
    state: RefCell<State>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    // ── failure knobs ─────────────────────────────────────────────────────

    /// Makes every compile of the given stage report failure from now on.
    pub fn force_compile_failure(&self, stage: ShaderStage) {
        self.state.borrow_mut().failing_stage = Some(stage);
    }

    /// Makes every subsequent link report failure.
    pub fn force_link_failure(&self) {
        self.state.borrow_mut().failing_link = true;
    }

    /// Pretends the named attribute was dropped by the shader compiler:
    /// lookups for it resolve to `None`.
    pub fn withhold_attrib(&self, name: &str) {
        self.state.borrow_mut().withheld_attribs.insert(name.to_owned());
    }

    // ── command log ───────────────────────────────────────────────────────

    /// Returns a copy of the commands recorded so far.
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Drains and returns the recorded commands, leaving the log empty.
    /// Object accounting is unaffected.
    pub fn take_calls(&self) -> Vec<GlCall> {
        std::mem::take(&mut self.state.borrow_mut().calls)
    }

    /// Number of triangle draws recorded (and not yet drained).
    pub fn draw_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, GlCall::DrawTriangleArrays { .. }))
            .count()
    }

    // ── object accounting ─────────────────────────────────────────────────

    pub fn created_buffers(&self) -> usize {
        self.state.borrow().created_buffers
    }

    pub fn deleted_buffers(&self) -> usize {
        self.state.borrow().deleted_buffers
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().live_buffers.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().live_shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().live_programs.len()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for RecordingGl {
    type Buffer = u32;
    type Shader = u32;
    type Program = u32;

    fn create_buffer(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_buffers.insert(id);
        state.created_buffers += 1;
        state.calls.push(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        let mut state = self.state.borrow_mut();
        state.live_buffers.remove(&buffer);
        state.deleted_buffers += 1;
        state.calls.push(GlCall::DeleteBuffer(buffer));
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(GlCall::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        self.record(GlCall::ArrayBufferData { bytes: data.to_vec(), usage });
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        self.record(GlCall::VertexAttribPointer { location, components, stride, offset });
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(GlCall::EnableVertexAttribArray(location));
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        self.record(GlCall::DisableVertexAttribArray(location));
    }

    fn draw_triangle_arrays(&self, first: i32, count: i32) {
        self.record(GlCall::DrawTriangleArrays { first, count });
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_shaders.insert(id);
        state.shader_stages.insert(id, stage);
        state.calls.push(GlCall::CreateShader { stage, shader: id });
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let _ = source;
        self.record(GlCall::ShaderSource { shader });
    }

    fn compile_shader(&self, shader: u32) {
        self.record(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let state = self.state.borrow();
        state.shader_stages.get(&shader).copied() != state.failing_stage
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "forced compile failure".to_owned()
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.live_shaders.remove(&shader);
        state.calls.push(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.live_programs.insert(id);
        state.calls.push(GlCall::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(GlCall::DetachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.record(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        let _ = program;
        !self.state.borrow().failing_link
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "forced link failure".to_owned()
        }
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.live_programs.remove(&program);
        state.calls.push(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        state
            .calls
            .push(GlCall::AttribLocation { program, name: name.to_owned() });

        if state.withheld_attribs.contains(name) {
            return None;
        }
        if let Some(&location) = state.attrib_locations.get(name) {
            return Some(location);
        }
        let location = state.next_attrib;
        state.next_attrib += 1;
        state.attrib_locations.insert(name.to_owned(), location);
        Some(location)
    }
}
