//! [`GlApi`] over a real GL context via `glow`.
//!
//! Every method forwards to the matching raw entry point. The usual glow
//! caveat applies: the context must be current on the calling thread for
//! the whole lifetime of the calls, which the host's serialized callback
//! contract already guarantees.

use glow::HasContext;

use super::api::{BufferUsage, GlApi, ShaderStage};

fn stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
        BufferUsage::StreamDraw => glow::STREAM_DRAW,
    }
}

impl GlApi for glow::Context {
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        unsafe {
            HasContext::buffer_data_u8_slice(self, glow::ARRAY_BUFFER, data, usage_to_gl(usage))
        }
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                location,
                components,
                glow::FLOAT,
                false,
                stride,
                offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, location) }
    }

    fn disable_vertex_attrib_array(&self, location: u32) {
        unsafe { HasContext::disable_vertex_attrib_array(self, location) }
    }

    fn draw_triangle_arrays(&self, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, first, count) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage_to_gl(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { HasContext::get_shader_compile_status(self, shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { HasContext::get_shader_info_log(self, shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { HasContext::get_program_link_status(self, program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { HasContext::get_program_info_log(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { HasContext::get_attrib_location(self, program, name) }
    }
}
