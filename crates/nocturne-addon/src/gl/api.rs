use core::fmt::Debug;

/// Shader stage selector for [`GlApi::create_shader`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Buffer data usage hint, forwarded to the driver verbatim.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    /// Contents specified once (or rarely) and drawn many times.
    StaticDraw,
    /// Contents re-specified roughly every frame.
    StreamDraw,
}

/// GPU API surface used by the addon runtime.
///
/// The host owns the GL context and guarantees serialized, single-threaded
/// access to every lifecycle callback, so implementations take `&self` and
/// need no internal locking.
///
/// Object handles are opaque associated types. `Option<T>` stands in for
/// the GL "no object bound" / "unallocated" sentinel everywhere; there is
/// no zero handle in this API.
pub trait GlApi {
    type Buffer: Copy + Eq + Debug;
    type Shader: Copy + Eq + Debug;
    type Program: Copy + Eq + Debug;

    // ── buffer objects ────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Binds `buffer` as the active array buffer; `None` unbinds.
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);

    /// Uploads `data` into the currently bound array buffer, replacing its
    /// previous contents.
    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage);

    // ── vertex attributes ─────────────────────────────────────────────────

    /// Points `location` at tightly interleaved `f32` data in the bound
    /// array buffer. `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32);

    fn enable_vertex_attrib_array(&self, location: u32);
    fn disable_vertex_attrib_array(&self, location: u32);

    // ── draw submission ───────────────────────────────────────────────────

    /// Draws `count` vertices starting at `first` as a triangle list.
    fn draw_triangle_arrays(&self, first: i32, count: i32);

    // ── shader objects ────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── program objects ───────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    /// Activates `program` for subsequent draws; `None` deactivates.
    fn use_program(&self, program: Option<Self::Program>);

    /// Resolves a named vertex attribute within a linked program.
    ///
    /// Returns `None` when the attribute does not exist in the program
    /// (typically a source typo, or an unused attribute the compiler
    /// optimized out).
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
}
