//! Render surface management.
//!
//! The scene model never rasterizes anything itself; the runtime only needs a
//! configured surface per window that it can clear and present. This module:
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates & configures the Surface (swapchain)
//! - recovers from lost/outdated surfaces

mod init;
mod surface;

pub use init::GpuInit;
pub use surface::{RenderSurface, SurfaceStatus};
