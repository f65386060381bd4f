use std::time::{Duration, Instant};

/// Timing snapshot for one rendered frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots for a host-driven render loop.
///
/// Delta time is clamped: the minimum keeps tight loops from reporting
/// zero, the maximum keeps a stall (debugger pause, minimized host) from
/// reaching downstream consumers as a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    min_dt: Duration,
    max_dt: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(min_dt: Duration, max_dt: Duration) -> Self {
        debug_assert!(min_dt <= max_dt);
        Self {
            last: Instant::now(),
            frame_index: 0,
            min_dt,
            max_dt,
        }
    }

    /// Re-baselines the clock, e.g. after a fresh `start`.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.min_dt, self.max_dt);
        self.last = now;

        let frame = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
