//! Bridge between a root component and the engine's window runtime.

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use esagil_engine::coords::{Color, Rect, Vec2};
use esagil_engine::core::{App, AppControl, FrameCtx};
use esagil_engine::device::GpuInit;
use esagil_engine::window::{Runtime, RuntimeConfig};

use crate::component::{item_count, visit_items, Component};
use crate::item::RenderingPrimitive;
use crate::tree::VisitAction;

// ── WindowProperties ──────────────────────────────────────────────────────

/// What a root component asks of the window that shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowProperties {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub size: Vec2,
    pub min_size: Option<Vec2>,
    pub resizable: bool,
    /// Clear color behind every item.
    pub background: Color,
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            title: "esagil".to_string(),
            size: Vec2::new(800.0, 600.0),
            min_size: None,
            resizable: true,
            background: Color::white(),
        }
    }
}

impl WindowProperties {
    pub fn runtime_config(&self) -> RuntimeConfig {
        let logical = |v: Vec2| LogicalSize::new(f64::from(v.x), f64::from(v.y));
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: logical(self.size),
            min_size: self.min_size.map(logical),
            resizable: self.resizable,
        }
    }
}

// ── ComponentWindow ───────────────────────────────────────────────────────

/// Shows one root component.
///
/// Creating the value prepares the renderer configuration, [`run`](Self::run)
/// opens the window and blocks until it closes, and dropping it tears the
/// renderer down.
pub struct ComponentWindow {
    gpu_init: GpuInit,
    runs: u32,
}

impl Default for ComponentWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentWindow {
    pub fn new() -> Self {
        Self::with_gpu_init(GpuInit::default())
    }

    pub fn with_gpu_init(gpu_init: GpuInit) -> Self {
        log::debug!("component window prepared ({:?})", gpu_init.present_mode);
        Self { gpu_init, runs: 0 }
    }

    /// Runs the event loop bound to `component` until the window closes.
    ///
    /// Every redraw lays the component out for the current window size,
    /// walks its items and presents the frame.
    pub fn run<C: Component + ?Sized>(&mut self, component: &C) -> Result<()> {
        let properties = component.window_properties();
        log::info!(
            "showing \"{}\" ({} items)",
            properties.title,
            item_count(component)
        );

        let config = properties.runtime_config();
        let app = ComponentApp { component, background: properties.background, laid_out: None };
        self.runs += 1;

        Runtime::run(config, self.gpu_init.clone(), app)
            .with_context(|| format!("window \"{}\" failed", properties.title))
    }
}

impl Drop for ComponentWindow {
    fn drop(&mut self) {
        log::debug!("component window torn down after {} run(s)", self.runs);
    }
}

/// Adapts a component to the engine's [`App`] contract.
struct ComponentApp<'c, C: ?Sized> {
    component: &'c C,
    background: Color,
    /// Size of the last successful layout; layout is skipped while it holds.
    laid_out: Option<Vec2>,
}

impl<C: Component + ?Sized> ComponentApp<'_, C> {
    fn layout(&mut self, size: Vec2) {
        if self.laid_out == Some(size) {
            return;
        }
        match self.component.compute_layout(size) {
            Ok(()) => self.laid_out = Some(size),
            Err(e) => {
                log::error!("layout for {size:?} failed: {e}");
                self.laid_out = None;
            }
        }
    }
}

impl<C: Component + ?Sized> App for ComponentApp<'_, C> {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.window.logical_size();
        self.layout(size);

        let frame = ctx.frame_index;
        let bounds = Rect::from_origin_size(Vec2::zero(), size);
        let mut drawn = 0usize;
        visit_items(self.component, |index, item| {
            let geometry = item.geometry();
            // Nothing below an empty item can be seen.
            if geometry.is_empty() {
                return VisitAction::SkipChildren;
            }
            let primitive = item.rendering_primitive();
            if primitive != RenderingPrimitive::NoContents {
                drawn += 1;
                log::trace!(
                    "frame {frame}: #{index} {} {geometry:?} {primitive:?}{}",
                    item.kind(),
                    if bounds.contains(geometry.origin) { "" } else { " (outside)" }
                );
            }
            VisitAction::Continue
        });
        log::trace!("frame {frame}: {drawn} primitives");

        ctx.present(self.background)
    }
}
