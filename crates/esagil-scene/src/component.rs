use esagil_engine::coords::Vec2;

use crate::item::ItemRef;
use crate::layout::LayoutError;
use crate::tree::{ItemVisitor, VisitAction, VisitFrom, VisitResult};
use crate::window::WindowProperties;

/// Capability table of a component.
///
/// Object safe: the window and repeaters only ever see `&dyn Component` or a
/// generic `C: Component`, never the concrete struct layout.
pub trait Component {
    /// Walks this component's items. Implementations forward to
    /// [`visit_item_tree`](crate::tree::visit_item_tree) with their static tree.
    fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult;

    /// Writes item geometry for a component occupying `size`.
    fn compute_layout(&self, size: Vec2) -> Result<(), LayoutError> {
        let _ = size;
        Ok(())
    }

    /// Settings for a window showing this component as its root.
    fn window_properties(&self) -> WindowProperties {
        WindowProperties::default()
    }
}

/// Walks every item of `component` with a closure.
pub fn visit_items<C, F>(component: &C, mut visitor: F) -> VisitResult
where
    C: Component + ?Sized,
    F: FnMut(usize, ItemRef<'_>) -> VisitAction,
{
    component.visit_children_item(VisitFrom::Root, &mut visitor)
}

/// Number of items reachable from the component root, generated ones included.
pub fn item_count<C: Component + ?Sized>(component: &C) -> usize {
    let mut count = 0;
    visit_items(component, |_, _| {
        count += 1;
        VisitAction::Continue
    });
    count
}
