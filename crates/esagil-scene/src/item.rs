use std::any::Any;
use std::fmt;

use esagil_engine::coords::{Color, Rect, Vec2};

// ── RenderingPrimitive ────────────────────────────────────────────────────

/// What an item would like drawn inside its geometry.
///
/// A description only; turning it into pixels is the renderer's business.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderingPrimitive {
    NoContents,
    Rectangle { color: Color },
    BorderRectangle { color: Color, border_width: f32, border_color: Color, radius: f32 },
    Text { text: String, color: Color, font_size: f32 },
    Image { source: String },
    /// Polyline in window coordinates.
    Path { points: Vec<Vec2>, closed: bool, stroke: Color, stroke_width: f32 },
}

// ── LayoutInfo ────────────────────────────────────────────────────────────

/// Size preferences an item reports to the layout that places it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInfo {
    pub min: Vec2,
    pub max: Vec2,
    pub preferred: Vec2,
    /// Share of leftover space per axis; `0` keeps the preferred size.
    pub stretch: Vec2,
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new(f32::INFINITY, f32::INFINITY),
            preferred: Vec2::zero(),
            stretch: Vec2::new(1.0, 1.0),
        }
    }
}

// ── Item ──────────────────────────────────────────────────────────────────

/// Implemented by every item kind.
///
/// State is kept in `Cell`s so layouts can write geometry while the item tree
/// is borrowed for a walk.
///
/// # Adding an item kind
///
/// ```rust,ignore
/// #[derive(Default)]
/// pub struct Spacer { geometry: Cell<Rect> }
///
/// impl Item for Spacer {
///     fn vtable() -> &'static ItemVTable {
///         static VTABLE: ItemVTable = ItemVTable::new::<Spacer>("Spacer");
///         &VTABLE
///     }
///     fn geometry(&self) -> Rect { self.geometry.get() }
///     fn set_geometry(&self, rect: Rect) { self.geometry.set(rect) }
/// }
/// ```
pub trait Item: Any {
    /// The one capability table shared by every item of this kind.
    fn vtable() -> &'static ItemVTable
    where
        Self: Sized;

    fn geometry(&self) -> Rect;

    fn set_geometry(&self, rect: Rect);

    fn rendering_primitive(&self) -> RenderingPrimitive {
        RenderingPrimitive::NoContents
    }

    fn layouting_info(&self) -> LayoutInfo {
        LayoutInfo::default()
    }
}

// ── ItemVTable ────────────────────────────────────────────────────────────

/// Capability table for one item kind.
///
/// Built once per kind with [`ItemVTable::new`] and stored in a `static`.
/// Every entry takes an [`ItemRef`], so callers dispatch without knowing the
/// concrete type.
pub struct ItemVTable {
    pub name: &'static str,
    pub geometry: fn(ItemRef<'_>) -> Rect,
    pub set_geometry: fn(ItemRef<'_>, Rect),
    pub rendering_primitive: fn(ItemRef<'_>) -> RenderingPrimitive,
    pub layouting_info: fn(ItemRef<'_>) -> LayoutInfo,
}

impl ItemVTable {
    /// Table whose entries forward to `T`'s [`Item`] impl.
    pub const fn new<T: Item>(name: &'static str) -> Self {
        Self {
            name,
            geometry: geometry_of::<T>,
            set_geometry: set_geometry_of::<T>,
            rendering_primitive: rendering_primitive_of::<T>,
            layouting_info: layouting_info_of::<T>,
        }
    }
}

impl fmt::Debug for ItemVTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemVTable").field("name", &self.name).finish_non_exhaustive()
    }
}

fn concrete<'a, T: Item>(item: ItemRef<'a>) -> &'a T {
    match item.downcast::<T>() {
        Some(concrete) => concrete,
        None => panic!("`{}` capability table used on a foreign item", item.vtable.name),
    }
}

fn geometry_of<T: Item>(item: ItemRef<'_>) -> Rect {
    concrete::<T>(item).geometry()
}

fn set_geometry_of<T: Item>(item: ItemRef<'_>, rect: Rect) {
    concrete::<T>(item).set_geometry(rect)
}

fn rendering_primitive_of<T: Item>(item: ItemRef<'_>) -> RenderingPrimitive {
    concrete::<T>(item).rendering_primitive()
}

fn layouting_info_of<T: Item>(item: ItemRef<'_>) -> LayoutInfo {
    concrete::<T>(item).layouting_info()
}

// ── ItemRef ───────────────────────────────────────────────────────────────

/// Borrowed, type-erased handle to an item living inside a component.
///
/// Pairs the item's capability table with its state. Never owns anything; the
/// lifetime ties it to the component borrow it was projected from.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    vtable: &'static ItemVTable,
    state: &'a dyn Any,
}

impl<'a> ItemRef<'a> {
    /// Pairs `item` with its own kind's table.
    #[inline]
    pub fn new<T: Item>(item: &'a T) -> Self {
        Self { vtable: T::vtable(), state: item }
    }

    #[inline]
    pub fn vtable(self) -> &'static ItemVTable {
        self.vtable
    }

    #[inline]
    pub fn kind(self) -> &'static str {
        self.vtable.name
    }

    #[inline]
    pub fn geometry(self) -> Rect {
        (self.vtable.geometry)(self)
    }

    #[inline]
    pub fn set_geometry(self, rect: Rect) {
        (self.vtable.set_geometry)(self, rect)
    }

    #[inline]
    pub fn rendering_primitive(self) -> RenderingPrimitive {
        (self.vtable.rendering_primitive)(self)
    }

    #[inline]
    pub fn layouting_info(self) -> LayoutInfo {
        (self.vtable.layouting_info)(self)
    }

    /// Typed access when the caller knows the kind.
    #[inline]
    pub fn downcast<T: Item>(self) -> Option<&'a T> {
        self.state.downcast_ref::<T>()
    }

    #[inline]
    pub fn is<T: Item>(self) -> bool {
        self.state.is::<T>()
    }
}

impl fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRef")
            .field("kind", &self.vtable.name)
            .field("geometry", &self.geometry())
            .finish()
    }
}
