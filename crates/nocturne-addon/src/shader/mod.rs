//! Shader-program subsystem.
//!
//! [`ShaderProgram`] owns one vertex/fragment pair through its whole life:
//! source loading, compile + link, per-frame enable/disable, teardown. The
//! addon side plugs in through [`ShaderHooks`], most importantly
//! `on_compiled_and_linked`, which fires once per successful link so
//! attribute locations can be resolved while the program is known valid.

mod error;
mod program;

pub use error::ShaderError;
pub use program::{ShaderHooks, ShaderProgram};
