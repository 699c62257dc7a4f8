//! Built-in leaf item kinds.
//!
//! Deliberately small: they exist so components have something to hold. Each
//! publishes its own capability table through [`Item::vtable`].

use std::cell::{Cell, RefCell};

use esagil_engine::coords::{Color, Rect, Vec2};

use crate::item::{Item, ItemVTable, LayoutInfo, RenderingPrimitive};
use crate::layout::PathLayout;

// ── Rectangle ─────────────────────────────────────────────────────────────

/// Color fill, optionally outlined and rounded.
#[derive(Debug, Default)]
pub struct Rectangle {
    pub geometry: Cell<Rect>,
    pub color: Cell<Color>,
    pub border_width: Cell<f32>,
    pub border_color: Cell<Color>,
    pub radius: Cell<f32>,
}

impl Rectangle {
    pub fn new(color: Color) -> Self {
        Self { color: Cell::new(color), ..Self::default() }
    }
}

impl Item for Rectangle {
    fn vtable() -> &'static ItemVTable {
        static VTABLE: ItemVTable = ItemVTable::new::<Rectangle>("Rectangle");
        &VTABLE
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn set_geometry(&self, rect: Rect) {
        self.geometry.set(rect);
    }

    fn rendering_primitive(&self) -> RenderingPrimitive {
        let (border_width, radius) = (self.border_width.get(), self.radius.get());
        if border_width > 0.0 || radius > 0.0 {
            RenderingPrimitive::BorderRectangle {
                color: self.color.get(),
                border_width,
                border_color: self.border_color.get(),
                radius,
            }
        } else {
            RenderingPrimitive::Rectangle { color: self.color.get() }
        }
    }
}

// ── Text ──────────────────────────────────────────────────────────────────

/// Single run of text.
#[derive(Debug)]
pub struct Text {
    pub geometry: Cell<Rect>,
    pub text: RefCell<String>,
    pub color: Cell<Color>,
    pub font_size: Cell<f32>,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            geometry: Cell::default(),
            text: RefCell::default(),
            color: Cell::new(Color::black()),
            font_size: Cell::new(14.0),
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: RefCell::new(text.into()), ..Self::default() }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl Item for Text {
    fn vtable() -> &'static ItemVTable {
        static VTABLE: ItemVTable = ItemVTable::new::<Text>("Text");
        &VTABLE
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn set_geometry(&self, rect: Rect) {
        self.geometry.set(rect);
    }

    fn rendering_primitive(&self) -> RenderingPrimitive {
        RenderingPrimitive::Text {
            text: self.text(),
            color: self.color.get(),
            font_size: self.font_size.get(),
        }
    }

    /// Estimates a single-line extent from the character count. Real shaping
    /// belongs to the renderer; this only gives layouts a plausible preference.
    fn layouting_info(&self) -> LayoutInfo {
        let size = self.font_size.get();
        let chars = self.text.borrow().chars().count() as f32;
        let preferred = Vec2::new(chars * size * 0.6, size * 1.25);
        LayoutInfo {
            min: Vec2::new(0.0, preferred.y),
            preferred,
            stretch: Vec2::zero(),
            ..LayoutInfo::default()
        }
    }
}

// ── Image ─────────────────────────────────────────────────────────────────

/// Image referenced by source name; `natural_size` is what the host knows
/// about its pixel dimensions.
#[derive(Debug, Default)]
pub struct Image {
    pub geometry: Cell<Rect>,
    pub source: RefCell<String>,
    pub natural_size: Cell<Vec2>,
}

impl Item for Image {
    fn vtable() -> &'static ItemVTable {
        static VTABLE: ItemVTable = ItemVTable::new::<Image>("Image");
        &VTABLE
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn set_geometry(&self, rect: Rect) {
        self.geometry.set(rect);
    }

    fn rendering_primitive(&self) -> RenderingPrimitive {
        RenderingPrimitive::Image { source: self.source.borrow().clone() }
    }

    fn layouting_info(&self) -> LayoutInfo {
        LayoutInfo { preferred: self.natural_size.get(), ..LayoutInfo::default() }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────

/// Stroked polyline. Points are relative to the item's geometry origin, so
/// moving the item moves the path.
///
/// Besides being drawn, a path is a track for other items:
/// [`Path::path_layout`] turns it into a [`PathLayout`].
#[derive(Debug)]
pub struct Path {
    pub geometry: Cell<Rect>,
    pub points: RefCell<Vec<Vec2>>,
    pub closed: Cell<bool>,
    pub stroke: Cell<Color>,
    pub stroke_width: Cell<f32>,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            geometry: Cell::default(),
            points: RefCell::default(),
            closed: Cell::new(false),
            stroke: Cell::new(Color::black()),
            stroke_width: Cell::new(1.0),
        }
    }
}

impl Path {
    pub fn set_points(&self, points: impl Into<Vec<Vec2>>) {
        *self.points.borrow_mut() = points.into();
    }

    /// Control points in window coordinates.
    pub fn absolute_points(&self) -> Vec<Vec2> {
        let origin = self.geometry.get().origin;
        self.points.borrow().iter().map(|p| *p + origin).collect()
    }

    /// Layout input that places items along this path. Items, spacing and
    /// offset are left for the caller to add.
    pub fn path_layout(&self) -> PathLayout {
        PathLayout::new(self.absolute_points()).closed(self.closed.get())
    }
}

impl Item for Path {
    fn vtable() -> &'static ItemVTable {
        static VTABLE: ItemVTable = ItemVTable::new::<Path>("Path");
        &VTABLE
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn set_geometry(&self, rect: Rect) {
        self.geometry.set(rect);
    }

    fn rendering_primitive(&self) -> RenderingPrimitive {
        RenderingPrimitive::Path {
            points: self.absolute_points(),
            closed: self.closed.get(),
            stroke: self.stroke.get(),
            stroke_width: self.stroke_width.get(),
        }
    }
}

// ── TouchArea ─────────────────────────────────────────────────────────────

/// Invisible input region. Routing policy lives outside the scene model;
/// the item only records whether it is currently pressed.
#[derive(Debug, Default)]
pub struct TouchArea {
    pub geometry: Cell<Rect>,
    pub pressed: Cell<bool>,
}

impl Item for TouchArea {
    fn vtable() -> &'static ItemVTable {
        static VTABLE: ItemVTable = ItemVTable::new::<TouchArea>("TouchArea");
        &VTABLE
    }

    fn geometry(&self) -> Rect {
        self.geometry.get()
    }

    fn set_geometry(&self, rect: Rect) {
        self.geometry.set(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemRef;

    #[test]
    fn text_primitive_reflects_current_state() {
        let text = Text::new("hello");
        text.color.set(Color::white());
        text.set_text("bye");
        assert_eq!(
            ItemRef::new(&text).rendering_primitive(),
            RenderingPrimitive::Text { text: "bye".into(), color: Color::white(), font_size: 14.0 }
        );
    }

    #[test]
    fn text_does_not_stretch() {
        let info = ItemRef::new(&Text::new("abc")).layouting_info();
        assert_eq!(info.stretch, Vec2::zero());
        assert!(info.preferred.x > 0.0);
    }

    #[test]
    fn rectangle_with_border_switches_primitive() {
        let rect = Rectangle::new(Color::white());
        assert_eq!(
            ItemRef::new(&rect).rendering_primitive(),
            RenderingPrimitive::Rectangle { color: Color::white() }
        );
        rect.radius.set(4.0);
        assert!(matches!(
            ItemRef::new(&rect).rendering_primitive(),
            RenderingPrimitive::BorderRectangle { radius, border_width, .. } if radius == 4.0 && border_width == 0.0
        ));
    }

    #[test]
    fn touch_area_draws_nothing() {
        let area = TouchArea::default();
        assert_eq!(ItemRef::new(&area).rendering_primitive(), RenderingPrimitive::NoContents);
    }

    #[test]
    fn path_follows_its_geometry() {
        let path = Path::default();
        path.set_points(vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
        path.closed.set(true);
        path.set_geometry(Rect::new(5.0, 7.0, 10.0, 1.0));

        let layout = path.path_layout();
        assert_eq!(layout.points, vec![Vec2::new(5.0, 7.0), Vec2::new(15.0, 7.0)]);
        assert!(layout.closed);
        assert!(matches!(
            ItemRef::new(&path).rendering_primitive(),
            RenderingPrimitive::Path { ref points, closed: true, .. } if points[1] == Vec2::new(15.0, 7.0)
        ));
    }

    #[test]
    fn image_prefers_natural_size() {
        let image = Image::default();
        image.natural_size.set(Vec2::new(64.0, 32.0));
        assert_eq!(ItemRef::new(&image).layouting_info().preferred, Vec2::new(64.0, 32.0));
    }
}
