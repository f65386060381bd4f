use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::gl::GlApi;
use crate::time::FrameClock;

use super::info::AddonInfo;
use super::saver::{AddonEntry, Screensaver};

/// Lifecycle state as seen by the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SaverState {
    Idle,
    Running,
}

/// Interval between frame-rate log lines.
const FRAME_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Host-side scheduler for a single screensaver instance.
///
/// Enforces the ordering the addon contract assumes: `render_frame` is a
/// no-op unless a `start` succeeded, a failed `start` leaves the driver
/// idle, and `stop` is always forwarded (the saver's own release guard
/// tolerates a stop without a start).
pub struct Driver<G: GlApi + 'static> {
    addon: AddonInfo,
    saver: Box<dyn Screensaver<G>>,
    state: SaverState,

    clock: FrameClock,
    frames_since_report: u32,
    last_report: Instant,
}

impl<G: GlApi + 'static> Driver<G> {
    pub fn new(addon: AddonInfo, saver: Box<dyn Screensaver<G>>) -> Self {
        Self {
            addon,
            saver,
            state: SaverState::Idle,
            clock: FrameClock::new(),
            frames_since_report: 0,
            last_report: Instant::now(),
        }
    }

    /// Instantiates the saver from its factory record.
    pub fn from_entry(addon: AddonInfo, entry: &AddonEntry<G>) -> Self {
        debug!("instantiating addon {} v{}", entry.id, entry.version);
        Self::new(addon, (entry.create)())
    }

    pub fn state(&self) -> SaverState {
        self.state
    }

    /// Starts the saver. On failure the driver stays idle and the error is
    /// returned for the host to surface.
    pub fn start(&mut self, gl: &G) -> Result<()> {
        if self.state == SaverState::Running {
            warn!("start requested while already running; ignored");
            return Ok(());
        }

        self.saver
            .start(gl, &self.addon)
            .context("screensaver failed to start")?;

        self.state = SaverState::Running;
        self.clock.reset();
        self.frames_since_report = 0;
        self.last_report = Instant::now();
        debug!("screensaver running");
        Ok(())
    }

    /// Renders one frame if the saver is running; otherwise does nothing.
    pub fn render_frame(&mut self, gl: &G) {
        if self.state != SaverState::Running {
            return;
        }

        let frame = self.clock.tick();
        self.saver.render(gl);

        self.frames_since_report += 1;
        let elapsed = frame.now.duration_since(self.last_report);
        if elapsed >= FRAME_REPORT_INTERVAL {
            let fps = self.frames_since_report as f32 / elapsed.as_secs_f32();
            debug!(
                "rendered {} frames in {:.1}s ({fps:.1} fps)",
                self.frames_since_report,
                elapsed.as_secs_f32()
            );
            self.frames_since_report = 0;
            self.last_report = frame.now;
        }
    }

    /// Stops the saver and returns the driver to idle.
    ///
    /// Always forwarded, even when idle; release is guarded saver-side.
    pub fn stop(&mut self, gl: &G) {
        self.saver.stop(gl);
        if self.state == SaverState::Running {
            debug!("screensaver stopped");
        }
        self.state = SaverState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addon::info::GlBackend;
    use crate::gl::recording::RecordingGl;

    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Counters {
        starts: Rc<Cell<u32>>,
        renders: Rc<Cell<u32>>,
        stops: Rc<Cell<u32>>,
    }

    struct StubSaver {
        counters: Counters,
        fail_start: bool,
    }

    impl Screensaver<RecordingGl> for StubSaver {
        fn start(&mut self, _gl: &RecordingGl, _addon: &AddonInfo) -> Result<()> {
            self.counters.starts.set(self.counters.starts.get() + 1);
            if self.fail_start {
                anyhow::bail!("shader pair refused to build");
            }
            Ok(())
        }

        fn stop(&mut self, _gl: &RecordingGl) {
            self.counters.stops.set(self.counters.stops.get() + 1);
        }

        fn render(&mut self, _gl: &RecordingGl) {
            self.counters.renders.set(self.counters.renders.get() + 1);
        }
    }

    fn driver(fail_start: bool) -> (Driver<RecordingGl>, Counters) {
        let counters = Counters::default();
        let saver = StubSaver { counters: counters.clone(), fail_start };
        let addon = AddonInfo::new("/addons/stub", GlBackend::Gl);
        (Driver::new(addon, Box::new(saver)), counters)
    }

    #[test]
    fn render_before_start_is_skipped() {
        let gl = RecordingGl::new();
        let (mut driver, counters) = driver(false);

        driver.render_frame(&gl);

        assert_eq!(counters.renders.get(), 0);
        assert_eq!(driver.state(), SaverState::Idle);
    }

    #[test]
    fn start_render_stop_round_trip() {
        let gl = RecordingGl::new();
        let (mut driver, counters) = driver(false);

        driver.start(&gl).unwrap();
        assert_eq!(driver.state(), SaverState::Running);

        driver.render_frame(&gl);
        driver.render_frame(&gl);
        driver.stop(&gl);

        assert_eq!(counters.starts.get(), 1);
        assert_eq!(counters.renders.get(), 2);
        assert_eq!(counters.stops.get(), 1);
        assert_eq!(driver.state(), SaverState::Idle);
    }

    #[test]
    fn failed_start_leaves_driver_idle() {
        let gl = RecordingGl::new();
        let (mut driver, counters) = driver(true);

        assert!(driver.start(&gl).is_err());
        assert_eq!(driver.state(), SaverState::Idle);

        driver.render_frame(&gl);
        assert_eq!(counters.renders.get(), 0);
    }

    #[test]
    fn second_start_while_running_is_ignored() {
        let gl = RecordingGl::new();
        let (mut driver, counters) = driver(false);

        driver.start(&gl).unwrap();
        driver.start(&gl).unwrap();

        assert_eq!(counters.starts.get(), 1);
    }

    #[test]
    fn stop_without_start_is_forwarded_once_per_call() {
        let gl = RecordingGl::new();
        let (mut driver, counters) = driver(false);

        driver.stop(&gl);
        driver.stop(&gl);

        assert_eq!(counters.stops.get(), 2);
        assert_eq!(driver.state(), SaverState::Idle);
    }
}
