//! Focus tracking across recycled rows.

/// What a freshly rebound slot must do about focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    /// Focus is elsewhere; leave the slot alone.
    None,
    /// The slot now represents the focused row: restore focus inside it.
    Restore,
    /// The slot used to represent the focused row: drop focus from it.
    Blur,
}

/// Remembers which logical row held focus, independent of the pooled item
/// that currently represents it.
///
/// Only focus notifications mutate the tracker; rebinding only reads it.
#[derive(Debug, Default, Clone)]
pub struct FocusTracker {
    last_focused_index: Option<usize>,
    /// Child positions from the row root down to the focused leaf.
    path: Vec<usize>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical index of the row that last held focus.
    pub fn last_focused_index(&self) -> Option<usize> {
        self.last_focused_index
    }

    /// Path from the focused row's root to the focused leaf.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Record focus inside row `index` at `path`.
    pub fn record(&mut self, index: usize, path: Vec<usize>) {
        log::debug!("[focus] record index={} path={:?}", index, path);
        self.last_focused_index = Some(index);
        self.path = path;
    }

    /// Forget the focused row.
    /// Returns true if a row was tracked.
    pub fn clear(&mut self) -> bool {
        self.path.clear();
        if self.last_focused_index.take().is_some() {
            log::debug!("[focus] cleared");
            true
        } else {
            false
        }
    }

    /// Decide what a slot rebound from `previous` to `new_index` must do.
    pub fn action_for(&self, new_index: usize, previous: Option<usize>) -> FocusAction {
        match self.last_focused_index {
            None => FocusAction::None,
            Some(focused) if focused == new_index => FocusAction::Restore,
            Some(focused) if Some(focused) == previous => FocusAction::Blur,
            Some(_) => FocusAction::None,
        }
    }
}
