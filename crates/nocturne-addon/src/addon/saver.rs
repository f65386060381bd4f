use anyhow::Result;

use crate::gl::GlApi;

use super::info::AddonInfo;

/// Screensaver lifecycle implemented by every addon.
///
/// The host invokes these exclusively, serialized on its rendering thread:
/// `start` once, `render` once per display frame while running, `stop`
/// once. Implementations own their GPU resources outright and never call
/// their own lifecycle.
pub trait Screensaver<G: GlApi> {
    /// Acquires GPU resources. A failed `start` must leave nothing
    /// allocated; the host surfaces the error and will not render.
    fn start(&mut self, gl: &G, addon: &AddonInfo) -> Result<()>;

    /// Releases GPU resources. Must be safe to call even if `start` never
    /// succeeded, and repeatedly.
    fn stop(&mut self, gl: &G);

    /// Draws one frame.
    fn render(&mut self, gl: &G);
}

/// Factory record the host's plugin loader consumes.
///
/// Replaces process-global registration: instead of an addon registering
/// itself at load time, the host receives one of these and decides when to
/// instantiate.
pub struct AddonEntry<G: GlApi + 'static> {
    /// Stable addon identifier, e.g. `"nocturne.triangle"`.
    pub id: &'static str,
    pub version: &'static str,
    pub create: fn() -> Box<dyn Screensaver<G>>,
}
