//! Nocturne addon runtime crate.
//!
//! This crate owns the host-boundary pieces shared by every screensaver
//! addon: the lifecycle contract and its host-side driver, addon resource
//! resolution, the GL seam and its backends, and the shader-program
//! subsystem.

pub mod addon;
pub mod gl;
pub mod shader;

pub mod logging;
pub mod time;
