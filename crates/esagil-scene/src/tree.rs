//! Flattened item trees and the walker over them.

use crate::item::ItemRef;

// ── ItemTreeNode ──────────────────────────────────────────────────────────

/// One entry of a component's item tree.
///
/// A component describes its shape with a `static` array of these. Child
/// ranges are contiguous spans of the same array, and node 0 is the root.
/// Projections stand in for field offsets: they borrow the item (or the
/// repeater) out of a live component.
pub enum ItemTreeNode<C> {
    /// A static item with a fixed set of children.
    Item {
        item: fn(&C) -> ItemRef<'_>,
        children_count: u32,
        children_index: u32,
    },
    /// A placeholder whose children are generated at walk time.
    DynamicTree { repeater: fn(&C) -> &dyn RepeatedTree },
}

impl<C> ItemTreeNode<C> {
    pub const fn item(item: fn(&C) -> ItemRef<'_>, children_count: u32, children_index: u32) -> Self {
        Self::Item { item, children_count, children_index }
    }

    pub const fn dynamic(repeater: fn(&C) -> &dyn RepeatedTree) -> Self {
        Self::DynamicTree { repeater }
    }
}

/// What a dynamic node resolves to: anything that can walk its own generated
/// sub-forest.
pub trait RepeatedTree {
    fn visit(&self, visitor: &mut dyn ItemVisitor) -> VisitResult;

    /// Number of generated instances.
    fn len(&self) -> usize;
}

// ── visiting ──────────────────────────────────────────────────────────────

/// Where a walk starts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VisitFrom {
    /// Node 0 and everything below it. Repeaters walk their instances this way.
    Root,
    /// Only the descendants of the given item node.
    ChildrenOf(usize),
}

/// Visitor's verdict for the item it was just shown.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VisitAction {
    Continue,
    /// Do not descend into this item's children.
    SkipChildren,
    /// Stop the whole walk.
    Abort,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VisitResult {
    Completed,
    Aborted,
}

impl VisitResult {
    #[inline]
    pub fn is_aborted(self) -> bool {
        self == VisitResult::Aborted
    }
}

/// Callback invoked for each item, with its index in the tree of the
/// component that owns it.
pub trait ItemVisitor {
    fn visit_item(&mut self, index: usize, item: ItemRef<'_>) -> VisitAction;
}

impl<F> ItemVisitor for F
where
    F: FnMut(usize, ItemRef<'_>) -> VisitAction,
{
    fn visit_item(&mut self, index: usize, item: ItemRef<'_>) -> VisitAction {
        self(index, item)
    }
}

/// Walks `item_tree` for `component` in pre-order.
///
/// Dynamic nodes hand over to their repeater, which walks every generated
/// instance from its own root, in generation order.
///
/// # Panics
///
/// On an index outside `item_tree`, or when `from` names a dynamic node.
/// Both mean the tree description is broken.
pub fn visit_item_tree<C>(
    component: &C,
    item_tree: &[ItemTreeNode<C>],
    from: VisitFrom,
    visitor: &mut dyn ItemVisitor,
) -> VisitResult {
    match from {
        VisitFrom::Root if item_tree.is_empty() => VisitResult::Completed,
        VisitFrom::Root => visit_node(component, item_tree, 0, visitor),
        VisitFrom::ChildrenOf(index) => match &item_tree[index] {
            ItemTreeNode::Item { children_count, children_index, .. } => {
                visit_children(component, item_tree, *children_index, *children_count, visitor)
            }
            ItemTreeNode::DynamicTree { .. } => {
                panic!("VisitFrom::ChildrenOf({index}) names a dynamic node")
            }
        },
    }
}

fn visit_node<C>(
    component: &C,
    item_tree: &[ItemTreeNode<C>],
    index: usize,
    visitor: &mut dyn ItemVisitor,
) -> VisitResult {
    match &item_tree[index] {
        ItemTreeNode::Item { item, children_count, children_index } => {
            match visitor.visit_item(index, item(component)) {
                VisitAction::Continue => {
                    visit_children(component, item_tree, *children_index, *children_count, visitor)
                }
                VisitAction::SkipChildren => VisitResult::Completed,
                VisitAction::Abort => VisitResult::Aborted,
            }
        }
        ItemTreeNode::DynamicTree { repeater } => repeater(component).visit(visitor),
    }
}

fn visit_children<C>(
    component: &C,
    item_tree: &[ItemTreeNode<C>],
    first: u32,
    count: u32,
    visitor: &mut dyn ItemVisitor,
) -> VisitResult {
    for child in first..first + count {
        if visit_node(component, item_tree, child as usize, visitor).is_aborted() {
            return VisitResult::Aborted;
        }
    }
    VisitResult::Completed
}
