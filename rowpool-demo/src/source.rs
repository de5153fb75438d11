//! Synthetic data and drag collaborators for the demo list.

use rowpool::{DataSource, DragSource, ItemId, PooledItem, SlotId};
use rowpool_dom::{Dom, Element, NodeId};

/// Rows of `row[label, button]`, generated from the index alone.
#[derive(Debug)]
pub struct DemoSource {
    count: usize,
}

impl DemoSource {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn set_count(&mut self, count: usize) {
        log::debug!("[demo] item count {} -> {}", self.count, count);
        self.count = count;
    }
}

fn label_of(dom: &Dom, row: NodeId) -> Option<NodeId> {
    dom.children(row).first().copied()
}

impl DataSource<Dom> for DemoSource {
    fn items_count(&self) -> usize {
        self.count
    }

    fn id_for_index(&self, index: usize) -> ItemId {
        ItemId(index as u64)
    }

    fn make_item(&mut self, slot: SlotId, dom: &mut Dom) -> NodeId {
        dom.instantiate(
            &Element::row()
                .id(slot.to_string())
                .child(Element::text(""))
                .child(Element::button("open")),
        )
    }

    fn bind_item(&mut self, item: &PooledItem<NodeId>, index: usize, dom: &mut Dom) {
        if let Some(label) = label_of(dom, item.visual()) {
            dom.set_text(label, format!("{:>10}  {}", index, item.slot()));
        }
    }

    fn unbind_item(&mut self, item: &PooledItem<NodeId>, _index: usize, dom: &mut Dom) {
        if let Some(label) = label_of(dom, item.visual()) {
            dom.set_text(label, "");
        }
    }

    fn destroy_item(&mut self, item: &PooledItem<NodeId>, _dom: &mut Dom) {
        log::trace!("[demo] destroy {}", item.slot());
    }
}

/// A row "held" by the user, standing in for a drag in progress.
#[derive(Debug, Default)]
pub struct DemoDrag {
    held: Option<(usize, SlotId)>,
}

impl DemoDrag {
    pub fn start(&mut self, index: usize, slot: SlotId) {
        log::debug!("[demo] drag start index={} {}", index, slot);
        self.held = Some((index, slot));
    }

    pub fn stop(&mut self) -> bool {
        self.held.take().is_some()
    }

    pub fn held(&self) -> Option<(usize, SlotId)> {
        self.held
    }
}

impl DragSource for DemoDrag {
    fn is_dragging_index(&self, index: usize) -> bool {
        self.held.is_some_and(|(held, _)| held == index)
    }

    fn dragged_slot(&self) -> Option<SlotId> {
        self.held.map(|(_, slot)| slot)
    }
}
