//! The demo component: a title, a grid of tiles and a ring of dots.
//!
//! Tiles and dots are generated by repeaters. Tiles come from a
//! [`VecModel`] and are placed with the grid solver; dots come from an
//! [`IntModel`] and are spread along a closed [`Path`] item.

use std::f32::consts::TAU;
use std::rc::{Rc, Weak};

use esagil_scene::prelude::*;

const TITLE_HEIGHT: f32 = 56.0;
const MARGIN: f32 = 16.0;
const GRID_COLUMNS: usize = 3;
const DOT_SIZE: f32 = 14.0;

// ── Gallery ───────────────────────────────────────────────────────────────

pub struct Gallery {
    background: Rectangle,
    title: Text,
    tiles: Repeater<Tile>,
    ring: Path,
    dots: Repeater<Dot>,
}

//   0 background
//   ├─ 1 title
//   ├─ 2 <tiles>
//   ├─ 3 ring
//   └─ 4 <dots>
static GALLERY_TREE: [ItemTreeNode<Gallery>; 5] = [
    ItemTreeNode::item(|c| ItemRef::new(&c.background), 4, 1),
    ItemTreeNode::item(|c| ItemRef::new(&c.title), 0, 5),
    ItemTreeNode::dynamic(|c| &c.tiles),
    ItemTreeNode::item(|c| ItemRef::new(&c.ring), 0, 5),
    ItemTreeNode::dynamic(|c| &c.dots),
];

impl Gallery {
    pub fn new(title: &str) -> Rc<Self> {
        let gallery = Self {
            background: Rectangle::new(Color::from_rgba_u32(0x1E_1C_1A_FF)),
            title: Text::new(title),
            tiles: Repeater::new(),
            ring: Path::default(),
            dots: Repeater::new(),
        };
        gallery.title.color.set(Color::from_rgba_u32(0xF2_E6_C9_FF));
        gallery.ring.closed.set(true);
        gallery.ring.stroke.set(Color::from_rgba_u32(0x5C_55_4B_FF));
        gallery.title.font_size.set(28.0);
        Rc::new(gallery)
    }

    /// Regenerates both repeaters.
    pub fn populate(self: &Rc<Self>, tiles: &VecModel<TileData>, dots: usize) {
        self.tiles.update_model(tiles, self);
        self.dots.update_model(&IntModel(dots), self);
    }

    fn layout_tiles(&self, area: Rect) -> Result<(), LayoutError> {
        let mut grid = GridLayout::new(area.size).origin(area.origin).spacing(MARGIN * 0.5).cols(GRID_COLUMNS);
        let (mut row, mut col) = (0, 0);
        self.tiles.for_each_instance(|_, tile| {
            let span = if tile.wide { 2 } else { 1 };
            if col + span > GRID_COLUMNS {
                row += 1;
                col = 0;
            }
            grid.cells.push(
                GridCell::new(row, col)
                    .span(1, span)
                    .vertical(LayoutConstraint::preferred(64.0).with_max(120.0)),
            );
            col += span;
        });

        let rects = solve_grid_layout(&grid)?;
        for (tile, rect) in self.tiles.instances().iter().zip(rects) {
            tile.place(rect);
        }
        Ok(())
    }

    fn layout_dots(&self, area: Rect) -> Result<(), LayoutError> {
        let center = area.size * 0.5;
        let radius = (area.size.x.min(area.size.y) * 0.5 - DOT_SIZE).max(0.0);
        self.ring.set_geometry(area);
        self.ring.set_points(
            (0..16)
                .map(|i| {
                    let a = i as f32 / 16.0 * TAU;
                    center + Vec2::new(a.cos(), a.sin()) * radius
                })
                .collect::<Vec<_>>(),
        );

        let path = self
            .ring
            .path_layout()
            .items((0..self.dots.len()).map(|_| Vec2::new(DOT_SIZE, DOT_SIZE)));
        let placements = solve_path_layout(&path)?;
        for (dot, placement) in self.dots.instances().iter().zip(placements) {
            dot.body.set_geometry(placement.rect(Vec2::new(DOT_SIZE, DOT_SIZE)));
        }
        Ok(())
    }
}

impl Component for Gallery {
    fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
        visit_item_tree(self, &GALLERY_TREE, from, visitor)
    }

    fn compute_layout(&self, size: Vec2) -> Result<(), LayoutError> {
        self.background.set_geometry(Rect::from_origin_size(Vec2::zero(), size));
        self.title.set_geometry(Rect::new(MARGIN, MARGIN, size.x - 2.0 * MARGIN, TITLE_HEIGHT - MARGIN));

        let body_y = TITLE_HEIGHT + MARGIN;
        let body_h = (size.y - body_y - MARGIN).max(0.0);
        let grid_w = ((size.x - 3.0 * MARGIN) * 2.0 / 3.0).max(0.0);
        let ring_w = (size.x - 3.0 * MARGIN - grid_w).max(0.0);

        self.layout_tiles(Rect::new(MARGIN, body_y, grid_w, body_h))?;
        self.layout_dots(Rect::new(2.0 * MARGIN + grid_w, body_y, ring_w, body_h))
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            title: self.title.text(),
            size: Vec2::new(900.0, 560.0),
            min_size: Some(Vec2::new(480.0, 320.0)),
            background: self.background.color.get(),
            ..WindowProperties::default()
        }
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub name: String,
    pub accent: Color,
    /// Spans two grid columns.
    pub wide: bool,
}

impl TileData {
    pub fn new(name: impl Into<String>, accent: Color, wide: bool) -> Self {
        Self { name: name.into(), accent, wide }
    }
}

#[derive(Default)]
pub struct Tile {
    frame: Rectangle,
    caption: Text,
    wide: bool,
    parent: Weak<Gallery>,
}

static TILE_TREE: [ItemTreeNode<Tile>; 2] = [
    ItemTreeNode::item(|c| ItemRef::new(&c.frame), 1, 1),
    ItemTreeNode::item(|c| ItemRef::new(&c.caption), 0, 2),
];

impl Tile {
    fn place(&self, rect: Rect) {
        self.frame.set_geometry(rect);
        let inset = Vec2::new(MARGIN * 0.5, MARGIN * 0.5);
        let caption = Rect::from_origin_size(rect.origin, rect.size - inset * 2.0).translated(inset);
        self.caption.set_geometry(caption);
    }
}

impl Component for Tile {
    fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
        visit_item_tree(self, &TILE_TREE, from, visitor)
    }
}

impl RepeatedComponent for Tile {
    type Parent = Gallery;
    type Data = TileData;

    fn set_parent(&mut self, parent: Weak<Gallery>) {
        self.parent = parent;
    }

    fn update_data(&mut self, _index: usize, data: &TileData) {
        self.wide = data.wide;
        self.frame.color.set(data.accent.with_alpha(0.85));
        self.frame.radius.set(6.0);
        self.frame.border_width.set(1.0);
        self.frame.border_color.set(data.accent);
        self.caption.set_text(data.name.as_str());
        // Captions use the gallery's title color.
        if let Some(gallery) = self.parent.upgrade() {
            self.caption.color.set(gallery.title.color.get());
        }
    }
}

// ── Dot ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Dot {
    body: Rectangle,
}

static DOT_TREE: [ItemTreeNode<Dot>; 1] = [ItemTreeNode::item(|c| ItemRef::new(&c.body), 0, 1)];

impl Component for Dot {
    fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
        visit_item_tree(self, &DOT_TREE, from, visitor)
    }
}

impl RepeatedComponent for Dot {
    type Parent = Gallery;
    type Data = ();

    fn set_parent(&mut self, _parent: Weak<Gallery>) {}

    fn update_data(&mut self, index: usize, _data: &()) {
        let shade = 0.35 + 0.05 * (index % 12) as f32;
        self.body.color.set(Color::new(shade, shade * 0.8, 0.3, 1.0));
        self.body.radius.set(DOT_SIZE * 0.5);
    }
}
