//! GL seam.
//!
//! [`GlApi`] is the narrow slice of the GL surface the addon runtime
//! touches: buffer management, vertex attribute binding, triangle draw
//! submission, and shader/program object handling. Savers and the shader
//! subsystem are written against the trait, never against raw GL.
//!
//! Two backends exist: the real thing over [`glow::Context`] (a trait
//! impl, nothing to import), and [`recording`], a headless backend that
//! captures the command stream for tests and host dry runs.

mod api;
mod native;
pub mod recording;

pub use api::{BufferUsage, GlApi, ShaderStage};
