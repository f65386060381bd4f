//! Host-facing addon contracts.
//!
//! This module defines the stable interface between the host runtime and a
//! screensaver addon: the lifecycle trait, the factory record the host's
//! plugin loader consumes, the install metadata the host supplies, and a
//! driver that enforces the lifecycle ordering on the host's behalf.

mod driver;
mod info;
mod saver;

pub use driver::{Driver, SaverState};
pub use info::{AddonInfo, GlBackend};
pub use saver::{AddonEntry, Screensaver};
