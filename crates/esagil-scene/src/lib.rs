//! Esagil scene: the retained model underneath a component runtime.
//!
//! A component is a plain struct holding its items, described by a `static`
//! array of [`ItemTreeNode`](tree::ItemTreeNode)s. Each node either projects a
//! static item out of the component or points at a [`Repeater`](repeater::Repeater)
//! that generates sub-components from a [`Model`](model::Model).
//!
//! # Defining a component
//!
//! ```rust,ignore
//! use esagil_scene::prelude::*;
//!
//! #[derive(Default)]
//! struct Card {
//!     background: Rectangle,
//!     caption: Text,
//! }
//!
//! static CARD_TREE: [ItemTreeNode<Card>; 2] = [
//!     ItemTreeNode::item(|c| ItemRef::new(&c.background), 1, 1),
//!     ItemTreeNode::item(|c| ItemRef::new(&c.caption), 0, 2),
//! ];
//!
//! impl Component for Card {
//!     fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
//!         visit_item_tree(self, &CARD_TREE, from, visitor)
//!     }
//! }
//! ```
//!
//! # Adding an item kind
//!
//! Implement [`Item`](item::Item) and publish one [`ItemVTable`](item::ItemVTable).
//! Nothing in the walker or the repeater changes.

pub mod component;
pub mod item;
pub mod items;
pub mod layout;
pub mod model;
pub mod repeater;
pub mod tree;
pub mod window;

/// Everything needed to define and run components.
pub mod prelude {
    pub use crate::component::{item_count, visit_items, Component};
    pub use crate::item::{Item, ItemRef, ItemVTable, LayoutInfo, RenderingPrimitive};
    pub use crate::items::{Image, Path, Rectangle, Text, TouchArea};
    pub use crate::layout::{
        solve_grid_layout, solve_path_layout, GridCell, GridLayout, LayoutConstraint,
        LayoutError, PathItem, PathLayout, PathPlacement, PathSpacing,
    };
    pub use crate::model::{IntModel, Model, VecModel};
    pub use crate::repeater::{RepeatedComponent, Repeater};
    pub use crate::tree::{
        visit_item_tree, ItemTreeNode, ItemVisitor, RepeatedTree, VisitAction, VisitFrom,
        VisitResult,
    };
    pub use crate::window::{ComponentWindow, WindowProperties};

    pub use esagil_engine::coords::{Color, Rect, Vec2};
}
