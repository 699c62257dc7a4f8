//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to a render surface.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
