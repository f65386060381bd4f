//! Triangle screensaver addon.
//!
//! The smallest complete addon: a shader pair loaded from the install
//! root's resources, one vertex buffer, three color-interpolated vertices
//! re-uploaded and drawn once per frame.

mod saver;
mod vertex;

use nocturne_addon::addon::AddonEntry;
use nocturne_addon::gl::GlApi;
use nocturne_addon::logging::{LogConfig, init_logging};

pub use saver::TriangleSaver;
pub use vertex::PackedVertex;

/// Addon identifier reported to the host.
pub const ADDON_ID: &str = "nocturne.triangle";

/// Factory record for the host's plugin loader.
pub fn addon_entry<G: GlApi + 'static>() -> AddonEntry<G> {
    AddonEntry {
        id: ADDON_ID,
        version: env!("CARGO_PKG_VERSION"),
        create: || {
            init_logging(LogConfig::default());
            Box::new(TriangleSaver::new())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nocturne_addon::addon::{AddonInfo, Driver, GlBackend, SaverState};
    use nocturne_addon::gl::recording::RecordingGl;

    #[test]
    fn entry_drives_a_full_lifecycle() {
        let gl = RecordingGl::new();
        let entry = addon_entry::<RecordingGl>();
        assert_eq!(entry.id, ADDON_ID);

        let addon = AddonInfo::new(env!("CARGO_MANIFEST_DIR"), GlBackend::Gl);
        let mut driver = Driver::from_entry(addon, &entry);

        driver.start(&gl).unwrap();
        assert_eq!(driver.state(), SaverState::Running);
        driver.render_frame(&gl);
        driver.stop(&gl);

        assert_eq!(driver.state(), SaverState::Idle);
        assert_eq!(gl.draw_count(), 1);
        assert_eq!(gl.live_buffers(), 0);
        assert_eq!(gl.live_programs(), 0);
    }
}
