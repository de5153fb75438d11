//! Ordered window of active pooled items.

use crate::item::PooledItem;

/// Pooled items currently covering `[first_visible_index, first_visible_index + len)`.
///
/// Position `i` in the window targets logical index `first_visible_index + i`.
#[derive(Debug)]
pub struct ActiveWindow<V> {
    items: Vec<PooledItem<V>>,
}

impl<V> Default for ActiveWindow<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V: Copy + PartialEq> ActiveWindow<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&PooledItem<V>> {
        self.items.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut PooledItem<V>> {
        self.items.get_mut(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PooledItem<V>> {
        self.items.iter()
    }

    /// Insert at `position`, or append when `None` or past the end.
    pub(crate) fn insert(&mut self, position: Option<usize>, item: PooledItem<V>) {
        match position {
            Some(pos) if pos < self.items.len() => self.items.insert(pos, item),
            _ => self.items.push(item),
        }
    }

    pub(crate) fn remove(&mut self, position: usize) -> PooledItem<V> {
        self.items.remove(position)
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, PooledItem<V>> {
        self.items.drain(..)
    }

    /// Window position of the item bound to `index`.
    pub fn position_of_index(&self, index: usize) -> Option<usize> {
        self.items.iter().position(|item| item.index == Some(index))
    }

    /// Window position of the item owning `visual`.
    pub fn position_of_visual(&self, visual: V) -> Option<usize> {
        self.items.iter().position(|item| item.visual() == visual)
    }

    /// Last display-visible item that is bound.
    pub fn last_displayed(&self) -> Option<&PooledItem<V>> {
        self.items
            .iter()
            .rev()
            .find(|item| item.displayed && item.index.is_some())
    }

    /// Number of display-visible items.
    pub fn displayed_count(&self) -> usize {
        self.items.iter().filter(|item| item.displayed).count()
    }

    /// Move the first `count` items to the end (scrolling down).
    pub(crate) fn rotate_forward(&mut self, count: usize) {
        if count > 0 && count < self.items.len() {
            self.items.rotate_left(count);
        }
    }

    /// Move the last `count` items to the start (scrolling up).
    pub(crate) fn rotate_backward(&mut self, count: usize) {
        if count > 0 && count < self.items.len() {
            self.items.rotate_right(count);
        }
    }
}
