use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the shader subsystem.
///
/// Driver info logs ride along in the variant payloads; the host decides
/// whether and where to surface them.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader source `{path}`")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("GL object creation failed: {0}")]
    Create(String),

    #[error("vertex shader failed to compile: {0}")]
    VertexCompile(String),

    #[error("fragment shader failed to compile: {0}")]
    FragmentCompile(String),

    #[error("shader program failed to link: {0}")]
    Link(String),
}
