#![allow(dead_code)]

use rowpool::{
    DataSource, DragSource, ItemId, PooledItem, RecyclerConfig, SlotId, VirtualizationController,
};
use rowpool_dom::{Dom, Element, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Make(SlotId),
    Bind(SlotId, usize),
    Unbind(SlotId, usize),
    Destroy(SlotId),
}

/// Data source that records every callback.
///
/// Rows are `row[text label, button]`; with `compact` set, newly made rows
/// have only the label.
#[derive(Debug, Default)]
pub struct RecordingSource {
    pub count: usize,
    pub revision: u64,
    pub stale: bool,
    pub compact: bool,
    pub calls: Vec<Call>,
}

impl RecordingSource {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn binds(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Bind(..))).count()
    }

    pub fn unbinds(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Unbind(..))).count()
    }

    pub fn makes(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Make(..))).count()
    }

    pub fn destroys(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Destroy(..))).count()
    }
}

impl DataSource<Dom> for RecordingSource {
    fn items_count(&self) -> usize {
        self.count
    }

    fn id_for_index(&self, index: usize) -> ItemId {
        ItemId(index as u64 + 1000)
    }

    fn has_valid_bindings(&self) -> bool {
        !self.stale
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn make_item(&mut self, slot: SlotId, dom: &mut Dom) -> NodeId {
        self.calls.push(Call::Make(slot));
        let mut row = Element::row().id(slot.to_string()).child(Element::text(""));
        if !self.compact {
            row = row.child(Element::button("open"));
        }
        dom.instantiate(&row)
    }

    fn bind_item(&mut self, item: &PooledItem<NodeId>, index: usize, dom: &mut Dom) {
        self.calls.push(Call::Bind(item.slot(), index));
        if let Some(label) = dom.children(item.visual()).first().copied() {
            dom.set_text(label, format!("item {index}"));
        }
    }

    fn unbind_item(&mut self, item: &PooledItem<NodeId>, index: usize, dom: &mut Dom) {
        self.calls.push(Call::Unbind(item.slot(), index));
        if let Some(label) = dom.children(item.visual()).first().copied() {
            dom.set_text(label, "");
        }
    }

    fn destroy_item(&mut self, item: &PooledItem<NodeId>, _dom: &mut Dom) {
        self.calls.push(Call::Destroy(item.slot()));
    }
}

#[derive(Debug, Default)]
pub struct TestDrag {
    pub index: Option<usize>,
    pub slot: Option<SlotId>,
}

impl DragSource for TestDrag {
    fn is_dragging_index(&self, index: usize) -> bool {
        self.index == Some(index)
    }

    fn dragged_slot(&self) -> Option<SlotId> {
        self.slot
    }
}

pub type Controller = VirtualizationController<Dom, RecordingSource, TestDrag>;

/// Controller over `count` items with row height 1 and the default overscan of 2.
pub fn controller(count: usize, viewport: f64) -> Controller {
    controller_with(count, viewport, RecyclerConfig::default())
}

pub fn controller_with(count: usize, viewport: f64, config: RecyclerConfig) -> Controller {
    let mut controller = VirtualizationController::new(
        config,
        Dom::new(),
        RecordingSource::new(count),
        TestDrag::default(),
    )
    .expect("valid config");
    controller.resize(viewport);
    controller
}

/// Bound index of each active slot, in window order.
pub fn bound(controller: &Controller) -> Vec<Option<usize>> {
    controller.active_items().map(|item| item.index()).collect()
}

/// Labels of the displayed content rows, in child order.
pub fn labels(controller: &Controller) -> Vec<String> {
    let dom = controller.surface();
    dom.displayed_rows()
        .into_iter()
        .map(|row| {
            dom.children(row)
                .first()
                .and_then(|label| dom.text(*label))
                .unwrap_or_default()
                .to_string()
        })
        .collect()
}

pub fn expected_labels(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("item {i}")).collect()
}

/// Visual of the active slot bound to `index`.
pub fn visual_of(controller: &Controller, index: usize) -> Option<NodeId> {
    controller
        .active_items()
        .find(|item| item.index() == Some(index))
        .map(|item| item.visual())
}

pub fn slot_of(controller: &Controller, index: usize) -> Option<SlotId> {
    controller
        .active_items()
        .find(|item| item.index() == Some(index))
        .map(|item| item.slot())
}

/// The focusable button inside a row visual.
pub fn button_of(dom: &Dom, row: NodeId) -> Option<NodeId> {
    dom.children(row).get(1).copied()
}

/// Every slot's bind/unbind calls must alternate, starting with a bind,
/// and each unbind must name the index of the preceding bind.
pub fn assert_paired(calls: &[Call]) {
    use std::collections::HashMap;

    let mut open: HashMap<SlotId, Option<usize>> = HashMap::new();
    for call in calls {
        match *call {
            Call::Make(slot) => {
                assert!(!open.contains_key(&slot), "{slot} made twice");
                open.insert(slot, None);
            }
            Call::Bind(slot, index) => {
                let state = open.get_mut(&slot).expect("bind before make");
                assert_eq!(*state, None, "{slot} bound to {index} while still bound");
                *state = Some(index);
            }
            Call::Unbind(slot, index) => {
                let state = open.get_mut(&slot).expect("unbind before make");
                assert_eq!(*state, Some(index), "{slot} unbound from {index} without matching bind");
                *state = None;
            }
            Call::Destroy(slot) => {
                let state = open.remove(&slot).expect("destroy of unknown slot");
                assert_eq!(state, None, "{slot} destroyed while bound");
            }
        }
    }
}
