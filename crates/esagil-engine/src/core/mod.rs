//! Engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and higher layers
//! (the scene's component window, tools). Runtime internals stay private.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
