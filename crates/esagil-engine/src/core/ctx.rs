use winit::window::{Window, WindowId};

use crate::coords::{Color, Vec2};
use crate::device::{RenderSurface, SurfaceStatus};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Logical window size in logical pixels.
    pub fn logical_size(&self) -> Vec2 {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        Vec2::new(logical.width as f32, logical.height as f32)
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window borrow carried by `RenderSurface<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub surface: &'a mut RenderSurface<'w>,
    /// Monotonic per-window frame counter.
    pub frame_index: u64,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears the window to `background` and presents the frame.
    pub fn present(&mut self, background: Color) -> AppControl {
        self.window.window.pre_present_notify();
        match self.surface.clear(background) {
            SurfaceStatus::Fatal => AppControl::Exit,
            SurfaceStatus::Reconfigured => {
                self.runtime.request_redraw();
                AppControl::Continue
            }
            SurfaceStatus::Presented | SurfaceStatus::Skipped => AppControl::Continue,
        }
    }
}
