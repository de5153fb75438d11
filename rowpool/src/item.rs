//! Pooled items and their identifiers.

/// Pool-assigned key of a [`PooledItem`].
///
/// Stable for the item's whole life and unrelated to the logical index it
/// happens to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot-{}", self.0)
    }
}

/// Identity token handed out by the data source for a logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u64);

/// A reusable visual bound to at most one logical index at a time.
///
/// The visual itself lives in the scroll surface; the item only keeps its
/// handle.
#[derive(Debug)]
pub struct PooledItem<V> {
    slot: SlotId,
    visual: V,
    pub(crate) index: Option<usize>,
    pub(crate) id: Option<ItemId>,
    pub(crate) displayed: bool,
    /// Consecutive passes this slot was held back by a drag.
    pub(crate) deferred: u32,
}

impl<V: Copy> PooledItem<V> {
    pub(crate) fn new(slot: SlotId, visual: V) -> Self {
        Self {
            slot,
            visual,
            index: None,
            id: None,
            displayed: true,
            deferred: 0,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Handle of the root visual in the scroll surface.
    pub fn visual(&self) -> V {
        self.visual
    }

    /// Logical index currently bound, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Identity of the item currently bound, if any.
    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    /// Whether the item's visual is display-visible.
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub fn is_bound(&self) -> bool {
        self.index.is_some()
    }
}
