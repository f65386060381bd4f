//! Logging utilities.
//!
//! Everything in this workspace logs through the `log` facade; this module
//! only centralizes initialization for hosts and tools that have no logger
//! of their own. A host that already installed one simply never calls it.

mod init;

pub use init::{LogConfig, init_logging};
