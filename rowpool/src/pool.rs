//! Reservoir of idle pooled items.

use crate::item::{PooledItem, SlotId};

/// Unordered free-list of idle [`PooledItem`]s.
///
/// Items are keyed by [`SlotId`], never by logical index. The pool never
/// creates visuals itself: [`acquire`](Self::acquire) returning `None` tells
/// the caller to make one and register it with [`reserve_slot`](Self::reserve_slot).
#[derive(Debug)]
pub struct RecyclingPool<V> {
    idle: Vec<PooledItem<V>>,
    next_slot: usize,
}

impl<V> Default for RecyclingPool<V> {
    fn default() -> Self {
        Self {
            idle: Vec::new(),
            next_slot: 0,
        }
    }
}

impl<V: Copy> RecyclingPool<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take an idle item, or `None` if a new one must be created.
    pub fn acquire(&mut self) -> Option<PooledItem<V>> {
        self.idle.pop()
    }

    /// Hand out the key for a newly created item.
    pub fn reserve_slot(&mut self) -> SlotId {
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        slot
    }

    /// Wrap a freshly made visual into a pooled item.
    pub fn create(&mut self, slot: SlotId, visual: V) -> PooledItem<V> {
        PooledItem::new(slot, visual)
    }

    /// Return an item to the reservoir. The item must already be unbound.
    pub fn release(&mut self, mut item: PooledItem<V>) {
        debug_assert!(
            item.index.is_none(),
            "{} released while still bound to {:?}",
            item.slot(),
            item.index
        );
        item.index = None;
        item.id = None;
        item.deferred = 0;
        self.idle.push(item);
    }

    /// Remove every idle item, handing them to the caller for destruction.
    pub fn drain(&mut self) -> std::vec::Drain<'_, PooledItem<V>> {
        self.idle.drain(..)
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Number of items ever created through this pool.
    pub fn created_count(&self) -> usize {
        self.next_slot
    }
}
