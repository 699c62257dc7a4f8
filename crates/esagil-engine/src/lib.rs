//! Esagil engine crate.
//!
//! Platform side of the component runtime: the winit event loop, one wgpu
//! render surface per window, logging setup, and the geometry primitives that
//! the scene crate lays items out with.

pub mod core;
pub mod device;
pub mod window;

pub mod coords;
pub mod logging;
