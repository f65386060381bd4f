//! Frame timing.
//!
//! One [`FrameClock`] per render loop; tick it once per frame. The host
//! owns frame pacing; the clock only observes it, keeping the saver side
//! free of timing state.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
