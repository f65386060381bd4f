use std::path::{Path, PathBuf};

/// GL flavor the host built its rendering stack for.
///
/// Selects the shader source subdirectory, since desktop GL and GLES need
/// different dialects of the same shaders.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GlBackend {
    #[default]
    Gl,
    Gles,
}

impl GlBackend {
    /// Subdirectory token under `resources/shaders/`.
    pub fn shader_dir(self) -> &'static str {
        match self {
            GlBackend::Gl => "GL",
            GlBackend::Gles => "GLES",
        }
    }
}

/// Install metadata the host hands to an addon.
#[derive(Debug, Clone)]
pub struct AddonInfo {
    root: PathBuf,
    backend: GlBackend,
}

impl AddonInfo {
    pub fn new(root: impl Into<PathBuf>, backend: GlBackend) -> Self {
        Self { root: root.into(), backend }
    }

    /// The addon's install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> GlBackend {
        self.backend
    }

    /// Resolves a path under the addon's `resources/` directory.
    pub fn resource_path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join("resources").join(rel)
    }

    /// Resolves a shader source file for the active backend.
    pub fn shader_path(&self, file_name: &str) -> PathBuf {
        self.resource_path(
            Path::new("shaders")
                .join(self.backend.shader_dir())
                .join(file_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_path_includes_backend_token() {
        let info = AddonInfo::new("/addons/nocturne", GlBackend::Gl);
        assert_eq!(
            info.shader_path("glsl.vert"),
            Path::new("/addons/nocturne/resources/shaders/GL/glsl.vert")
        );

        let info = AddonInfo::new("/addons/nocturne", GlBackend::Gles);
        assert_eq!(
            info.shader_path("glsl.frag"),
            Path::new("/addons/nocturne/resources/shaders/GLES/glsl.frag")
        );
    }

    #[test]
    fn resource_path_joins_under_resources() {
        let info = AddonInfo::new("/addons/nocturne", GlBackend::Gl);
        assert_eq!(
            info.resource_path("icon.png"),
            Path::new("/addons/nocturne/resources/icon.png")
        );
    }
}
