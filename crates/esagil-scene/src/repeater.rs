use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::component::Component;
use crate::model::Model;
use crate::tree::{ItemVisitor, RepeatedTree, VisitFrom, VisitResult};

/// A component type that a [`Repeater`] can stamp out once per model element.
pub trait RepeatedComponent: Component + Default + 'static {
    /// Component that hosts the repeater. Instances only look things up
    /// through it (e.g. inherited colors); they never own it.
    type Parent: ?Sized + 'static;

    /// Model element type this component is fed with.
    type Data: ?Sized;

    fn set_parent(&mut self, parent: Weak<Self::Parent>);

    /// Called once per instance, right after construction.
    fn update_data(&mut self, index: usize, data: &Self::Data);
}

/// Owns the sequence of components generated from a model.
///
/// Synchronization is explicit and total: [`update_model`](Self::update_model)
/// throws every instance away and builds a new set. Instance identity is not
/// preserved across calls.
///
/// Mutating a repeater while it is being walked is a bug and panics.
pub struct Repeater<C> {
    instances: RefCell<Vec<C>>,
}

impl<C> Default for Repeater<C> {
    fn default() -> Self {
        Self { instances: RefCell::new(Vec::new()) }
    }
}

impl<C: RepeatedComponent> Repeater<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the instances from `model`, one per element, each pointing
    /// back at `parent`.
    ///
    /// Afterwards `self.len() == model.count()`.
    pub fn update_model<M>(&self, model: &M, parent: &Rc<C::Parent>)
    where
        M: Model<Data = C::Data> + ?Sized,
    {
        let mut instances = self.instances.borrow_mut();
        let previous = instances.len();
        instances.clear();

        let count = model.count();
        instances.reserve(count);
        for index in 0..count {
            let mut instance = C::default();
            instance.set_parent(Rc::downgrade(parent));
            instance.update_data(index, model.get(index));
            instances.push(instance);
        }

        log::debug!(
            "repeater of {}: {previous} -> {count} instances",
            std::any::type_name::<C>()
        );
    }

    /// Walks each instance's item tree from its root, in model order.
    pub fn visit(&self, visitor: &mut dyn ItemVisitor) -> VisitResult {
        for instance in self.instances.borrow().iter() {
            if instance.visit_children_item(VisitFrom::Root, visitor).is_aborted() {
                return VisitResult::Aborted;
            }
        }
        VisitResult::Completed
    }

    pub fn len(&self) -> usize {
        self.instances.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.borrow().is_empty()
    }

    /// Drops every instance.
    pub fn clear(&self) {
        self.instances.borrow_mut().clear();
    }

    /// Read access to the generated instances, e.g. for the parent's layout.
    ///
    /// The guard must be released before the next `update_model`.
    pub fn instances(&self) -> Ref<'_, [C]> {
        Ref::map(self.instances.borrow(), Vec::as_slice)
    }

    /// Calls `f` with each instance and its model index.
    pub fn for_each_instance(&self, mut f: impl FnMut(usize, &C)) {
        for (index, instance) in self.instances.borrow().iter().enumerate() {
            f(index, instance);
        }
    }
}

impl<C: RepeatedComponent> RepeatedTree for Repeater<C> {
    fn visit(&self, visitor: &mut dyn ItemVisitor) -> VisitResult {
        Repeater::visit(self, visitor)
    }

    fn len(&self) -> usize {
        Repeater::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::component::{item_count, visit_items};
    use crate::item::ItemRef;
    use crate::items::{Rectangle, Text};
    use crate::model::{IntModel, VecModel};
    use crate::tree::{visit_item_tree, ItemTreeNode, VisitAction};
    use esagil_engine::coords::Color;

    // ── fixture ───────────────────────────────────────────────────────────

    thread_local! {
        static LIVE_ROWS: Cell<usize> = const { Cell::new(0) };
    }

    #[derive(Default)]
    struct Host {
        frame: Rectangle,
        rows: Repeater<Row>,
        footer: Text,
    }

    static HOST_TREE: [ItemTreeNode<Host>; 3] = [
        ItemTreeNode::item(|c| ItemRef::new(&c.frame), 2, 1),
        ItemTreeNode::dynamic(|c| &c.rows),
        ItemTreeNode::item(|c| ItemRef::new(&c.footer), 0, 3),
    ];

    impl Component for Host {
        fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
            visit_item_tree(self, &HOST_TREE, from, visitor)
        }
    }

    struct Row {
        background: Rectangle,
        label: Text,
        parent: Weak<Host>,
        index: usize,
    }

    impl Default for Row {
        fn default() -> Self {
            LIVE_ROWS.with(|n| n.set(n.get() + 1));
            Self {
                background: Rectangle::default(),
                label: Text::default(),
                parent: Weak::new(),
                index: usize::MAX,
            }
        }
    }

    impl Drop for Row {
        fn drop(&mut self) {
            LIVE_ROWS.with(|n| n.set(n.get() - 1));
        }
    }

    static ROW_TREE: [ItemTreeNode<Row>; 2] = [
        ItemTreeNode::item(|c| ItemRef::new(&c.background), 1, 1),
        ItemTreeNode::item(|c| ItemRef::new(&c.label), 0, 2),
    ];

    impl Component for Row {
        fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
            visit_item_tree(self, &ROW_TREE, from, visitor)
        }
    }

    impl RepeatedComponent for Row {
        type Parent = Host;
        type Data = String;

        fn set_parent(&mut self, parent: Weak<Host>) {
            self.parent = parent;
        }

        fn update_data(&mut self, index: usize, data: &String) {
            self.index = index;
            self.label.set_text(data.as_str());
            // Inherit the footer color from the host.
            if let Some(host) = self.parent.upgrade() {
                self.label.color.set(host.footer.color.get());
            }
        }
    }

    fn labels(host: &Host) -> Vec<String> {
        let mut out = Vec::new();
        visit_items(host, |_, item| {
            if let Some(text) = item.downcast::<Text>() {
                out.push(text.text());
            }
            VisitAction::Continue
        });
        out
    }

    fn model(items: &[&str]) -> VecModel<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── update_model ──────────────────────────────────────────────────────

    #[test]
    fn instance_count_matches_model() {
        let host = Rc::new(Host::default());
        host.rows.update_model(&model(&["a", "b", "c"]), &host);
        assert_eq!(host.rows.len(), 3);
        assert_eq!(host.rows.instances()[2].index, 2);
    }

    #[test]
    fn empty_model_yields_no_instances() {
        let host = Rc::new(Host::default());
        host.rows.update_model(&model(&["a"]), &host);
        host.rows.update_model(&model(&[]), &host);
        assert!(host.rows.is_empty());
        assert_eq!(labels(&host), vec![String::new()]);
    }

    #[test]
    fn replacing_the_model_drops_previous_instances() {
        let host = Rc::new(Host::default());
        let before = LIVE_ROWS.with(Cell::get);

        host.rows.update_model(&model(&["a", "b", "c"]), &host);
        assert_eq!(LIVE_ROWS.with(Cell::get), before + 3);

        host.rows.update_model(&model(&["z"]), &host);
        assert_eq!(LIVE_ROWS.with(Cell::get), before + 1);
        assert_eq!(host.rows.len(), 1);

        // Only the new instance is walked: root frame, one row (2 items), footer.
        assert_eq!(item_count(&*host), 4);
        assert_eq!(labels(&host), vec!["z".to_string(), String::new()]);
    }

    #[test]
    fn walk_order_follows_model_order() {
        let host = Rc::new(Host::default());
        host.footer.set_text("end");
        host.rows.update_model(&model(&["one", "two"]), &host);
        assert_eq!(labels(&host), vec!["one", "two", "end"]);
    }

    #[test]
    fn clear_empties_the_repeater() {
        let host = Rc::new(Host::default());
        host.rows.update_model(&model(&["a", "b"]), &host);
        host.rows.clear();
        assert_eq!(item_count(&*host), 2);
    }

    // ── parent back-reference ─────────────────────────────────────────────

    #[test]
    fn instances_inherit_from_parent_without_owning_it() {
        let host = Rc::new(Host::default());
        host.footer.color.set(Color::white());
        host.rows.update_model(&model(&["a"]), &host);

        assert_eq!(host.rows.instances()[0].label.color.get(), Color::white());
        assert_eq!(Rc::strong_count(&host), 1);
        assert!(host.rows.instances()[0].parent.upgrade().is_some());
    }

    // ── IntModel ──────────────────────────────────────────────────────────

    #[derive(Default)]
    struct Dot {
        body: Rectangle,
        index: usize,
    }

    static DOT_TREE: [ItemTreeNode<Dot>; 1] = [ItemTreeNode::item(|c| ItemRef::new(&c.body), 0, 1)];

    impl Component for Dot {
        fn visit_children_item(&self, from: VisitFrom, visitor: &mut dyn ItemVisitor) -> VisitResult {
            visit_item_tree(self, &DOT_TREE, from, visitor)
        }
    }

    impl RepeatedComponent for Dot {
        type Parent = ();
        type Data = ();

        fn set_parent(&mut self, _parent: Weak<()>) {}

        fn update_data(&mut self, index: usize, _data: &()) {
            self.index = index;
        }
    }

    #[test]
    fn int_model_generates_indexed_instances() {
        let repeater = Repeater::<Dot>::new();
        let unit = Rc::new(());
        repeater.update_model(&IntModel(4), &unit);
        let indices: Vec<usize> = repeater.instances().iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let mut pairs = Vec::new();
        repeater.for_each_instance(|i, dot| pairs.push((i, dot.index)));
        assert!(pairs.iter().all(|(i, index)| i == index));
    }

    #[test]
    fn abort_stops_at_first_instance() {
        let repeater = Repeater::<Dot>::new();
        repeater.update_model(&IntModel(3), &Rc::new(()));
        let mut seen = 0;
        let mut visitor = |_: usize, _: ItemRef<'_>| {
            seen += 1;
            VisitAction::Abort
        };
        assert_eq!(repeater.visit(&mut visitor), VisitResult::Aborted);
        assert_eq!(seen, 1);
    }

    #[test]
    #[should_panic]
    fn resync_during_walk_panics() {
        let host = Rc::new(Host::default());
        host.rows.update_model(&model(&["a"]), &host);
        let inner = Rc::clone(&host);
        visit_items(&*host, move |_, _| {
            inner.rows.update_model(&model(&["b"]), &inner);
            VisitAction::Continue
        });
    }
}
