//! Virtualization controller.
//!
//! Owns the recycling pool, the active window, the focus tracker and the
//! background filler, and is the only thing that mutates them. Every
//! operation runs to completion synchronously and is bounded by the window
//! size, never by the item count.

use crate::background::BackgroundFiller;
use crate::config::RecyclerConfig;
use crate::error::ConfigError;
use crate::focus::{FocusAction, FocusTracker};
use crate::item::PooledItem;
use crate::pool::RecyclingPool;
use crate::surface::{DataSource, DragSource, NoDrag, ScrollSurface};
use crate::window::ActiveWindow;
use crate::ALT_ROW_CLASS;

/// Upper bound on window slots, whatever the viewport height.
pub const MAX_WINDOW_SLOTS: usize = 1 << 16;

/// Fixed-row-height windowing controller.
///
/// # Example
///
/// ```ignore
/// let mut controller = VirtualizationController::new(config, surface, source, NoDrag)?;
/// controller.resize(viewport_height);
/// controller.on_scroll(offset);
/// controller.refresh(false);
/// ```
pub struct VirtualizationController<S, D, G = NoDrag>
where
    S: ScrollSurface,
    D: DataSource<S>,
    G: DragSource,
{
    config: RecyclerConfig,
    surface: S,
    source: D,
    drag: G,

    pool: RecyclingPool<S::Visual>,
    active: ActiveWindow<S::Visual>,
    focus: FocusTracker,
    filler: BackgroundFiller<S::Visual>,

    first_visible_index: usize,
    // Geometry in f64: f32 cannot address single rows past 2^24.
    scroll_offset: f64,
    viewport_height: f64,

    /// (revision, items_count) seen at the last valid refresh.
    synced: Option<(u64, usize)>,
    /// Set by `invalidate`; forces the next refresh to rebind.
    force_rebind: bool,
}

impl<S, D, G> VirtualizationController<S, D, G>
where
    S: ScrollSurface,
    D: DataSource<S>,
    G: DragSource,
{
    /// Create a controller with an empty window. Call [`resize`](Self::resize)
    /// once the viewport height is known.
    pub fn new(config: RecyclerConfig, surface: S, source: D, drag: G) -> Result<Self, ConfigError> {
        config.validate()?;
        let synced = Some((source.revision(), source.items_count()));
        Ok(Self {
            config,
            surface,
            source,
            drag,
            pool: RecyclingPool::new(),
            active: ActiveWindow::new(),
            focus: FocusTracker::new(),
            filler: BackgroundFiller::new(),
            first_visible_index: 0,
            scroll_offset: 0.0,
            viewport_height: 0.0,
            synced,
            force_rebind: false,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &RecyclerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    /// Mutable access to the data source. Call [`refresh`](Self::refresh)
    /// after changing the data.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn drag(&self) -> &G {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut G {
        &mut self.drag
    }

    pub fn first_visible_index(&self) -> usize {
        self.first_visible_index
    }

    /// Number of display-visible active items.
    pub fn visible_item_count(&self) -> usize {
        self.active.displayed_count()
    }

    /// Active items in window order.
    pub fn active_items(&self) -> impl Iterator<Item = &PooledItem<S::Visual>> {
        self.active.iter()
    }

    pub fn active_window(&self) -> &ActiveWindow<S::Visual> {
        &self.active
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Height of all real rows.
    pub fn content_height(&self) -> f64 {
        self.source.items_count() as f64 * self.row_height()
    }

    fn row_height(&self) -> f64 {
        f64::from(self.config.row_height)
    }

    /// Logical index of the row last known to hold focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.focus.last_focused_index()
    }

    pub fn focus_tracker(&self) -> &FocusTracker {
        &self.focus
    }

    pub fn background(&self) -> &BackgroundFiller<S::Visual> {
        &self.filler
    }

    pub fn pool_idle_count(&self) -> usize {
        self.pool.idle_count()
    }

    /// Number of pooled items ever created.
    pub fn created_count(&self) -> usize {
        self.pool.created_count()
    }

    /// Rows needed to cover the viewport, without overscan.
    pub fn visible_row_capacity(&self) -> usize {
        (self.viewport_height / self.row_height()).ceil() as usize
    }

    /// Viewport-relative y at which the first active slot is drawn.
    pub fn first_row_offset(&self) -> f64 {
        self.first_visible_index as f64 * self.row_height() - self.scroll_offset
    }

    /// Logical index under viewport-relative `y`.
    pub fn index_at_offset(&self, y: f64) -> Option<usize> {
        let absolute = self.scroll_offset + y;
        if absolute < 0.0 {
            return None;
        }
        let index = (absolute / self.row_height()).floor() as usize;
        (index < self.source.items_count()).then_some(index)
    }

    // -------------------------------------------------------------------------
    // Window sizing and scrolling
    // -------------------------------------------------------------------------

    /// Grow or shrink the active window to cover `viewport_height`.
    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = if viewport_height.is_finite() {
            viewport_height.max(0.0)
        } else {
            0.0
        };
        let wanted = self
            .visible_row_capacity()
            .saturating_add(self.config.overscan);
        let target = wanted.min(MAX_WINDOW_SLOTS);
        if wanted > target {
            log::warn!(
                "[recycler] viewport {} wants {} slots, window capped at {}",
                self.viewport_height,
                wanted,
                target
            );
        }

        if target != self.active.len() {
            log::debug!(
                "[recycler] resize viewport={} window {} -> {}",
                self.viewport_height,
                self.active.len(),
                target
            );
        }

        while self.active.len() < target {
            self.get_or_make_item_at_index(None, None);
        }
        while self.active.len() > target {
            self.release_item(self.active.len() - 1);
        }

        self.on_scroll(self.scroll_offset);
    }

    /// Apply a new scroll offset and rebind the window accordingly.
    pub fn on_scroll(&mut self, offset: f64) {
        self.set_offset(offset);
        self.apply_window();
    }

    /// Clamp `offset` to the content and move the window to its first row.
    fn set_offset(&mut self, offset: f64) {
        let max_offset = (self.content_height() - self.viewport_height).max(0.0);
        let offset = if offset.is_finite() {
            offset.clamp(0.0, max_offset)
        } else {
            0.0
        };
        self.scroll_offset = offset;

        let first = (offset / self.row_height()).floor() as usize;
        if first != self.first_visible_index {
            self.shift_window(first);
        }
    }

    /// Scroll the least amount that makes `index` fully visible.
    pub fn scroll_to_item(&mut self, index: usize) {
        let count = self.source.items_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        let row_height = self.row_height();
        let top = index as f64 * row_height;
        let bottom = top + row_height;

        let offset = if top < self.scroll_offset {
            top
        } else if bottom > self.scroll_offset + self.viewport_height {
            bottom - self.viewport_height
        } else {
            self.scroll_offset
        };
        self.on_scroll(offset);
    }

    /// Scroll so the last item is at the bottom of the viewport.
    pub fn scroll_to_end(&mut self) {
        self.on_scroll(f64::MAX);
    }

    /// Reorder the window for a new first visible index, keeping slots that
    /// stay on screen attached to the rows they already show.
    fn shift_window(&mut self, first: usize) {
        let len = self.active.len();
        let old = self.first_visible_index;
        self.first_visible_index = first;

        if first > old && first - old < len {
            let shift = first - old;
            for pos in 0..shift {
                if let Some(item) = self.active.get(pos) {
                    self.surface.bring_to_front(item.visual());
                }
            }
            self.active.rotate_forward(shift);
        } else if first < old && old - first < len {
            let shift = old - first;
            for pos in (len - shift..len).rev() {
                if let Some(item) = self.active.get(pos) {
                    self.surface.send_to_back(item.visual());
                }
            }
            self.active.rotate_backward(shift);
        }
    }

    /// Set up every slot for its target index.
    fn apply_window(&mut self) {
        if !self.source.has_valid_bindings() {
            self.hide_out_of_range();
            return;
        }
        for pos in 0..self.active.len() {
            self.setup(pos, self.first_visible_index + pos);
        }
        self.update_background();
    }

    /// Stale-binding fallback: adjust display flags only.
    fn hide_out_of_range(&mut self) {
        let count = self.source.items_count();
        for pos in 0..self.active.len() {
            let target = self.first_visible_index + pos;
            let Some(item) = self.active.get_mut(pos) else {
                continue;
            };
            if target >= count && item.displayed {
                self.surface.set_displayed(item.visual(), false);
                item.displayed = false;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Refresh
    // -------------------------------------------------------------------------

    /// Force the next [`refresh`](Self::refresh) to rebind every visible slot.
    pub fn invalidate(&mut self) {
        self.force_rebind = true;
    }

    /// Re-synchronize the window with the data source.
    ///
    /// With `rebuild`, every item is unbound and destroyed, the pool and the
    /// surface's children are cleared, and the window is grown afresh.
    pub fn refresh(&mut self, rebuild: bool) {
        let valid = self.source.has_valid_bindings();

        if rebuild {
            self.teardown(valid);
            self.resize(self.viewport_height);
            if valid {
                self.mark_synced();
            }
            return;
        }

        if !valid {
            log::trace!("[recycler] refresh with stale bindings, hiding only");
            self.hide_out_of_range();
            return;
        }

        // The count may have shrunk below the current offset.
        self.set_offset(self.scroll_offset);

        let count = self.source.items_count();
        let changed = self.force_rebind
            || self.synced != Some((self.source.revision(), count));

        for pos in 0..self.active.len() {
            let target = self.first_visible_index + pos;
            let Some(item) = self.active.get_mut(pos) else {
                continue;
            };

            if target < count {
                let dragged = self.drag.is_dragging_index(target)
                    || self.drag.dragged_slot() == Some(item.slot());
                let stale = if changed && !dragged { item.index.take() } else { None };
                if let Some(previous) = stale {
                    self.source.unbind_item(item, previous, &mut self.surface);
                    item.id = None;
                }
                self.setup(pos, target);
            } else {
                if item.displayed {
                    self.surface.set_displayed(item.visual(), false);
                    item.displayed = false;
                }
                if let Some(previous) = item.index {
                    self.source.unbind_item(item, previous, &mut self.surface);
                    item.index = None;
                    item.id = None;
                }
            }
        }

        self.mark_synced();
        self.update_background();
    }

    fn mark_synced(&mut self) {
        self.synced = Some((self.source.revision(), self.source.items_count()));
        self.force_rebind = false;
    }

    /// Unbind and destroy every item, active and idle.
    fn teardown(&mut self, valid: bool) {
        log::debug!(
            "[recycler] rebuild: destroying {} active and {} idle items",
            self.active.len(),
            self.pool.idle_count()
        );

        self.surface.clear_children();

        let mut doomed: Vec<PooledItem<S::Visual>> = self.active.drain().collect();
        doomed.extend(self.pool.drain());

        for mut item in doomed {
            if let Some(index) = item.index.take().filter(|_| valid) {
                self.source.unbind_item(&item, index, &mut self.surface);
            }
            self.source.destroy_item(&item, &mut self.surface);
            self.surface.destroy_visual(item.visual());
        }

        self.focus.clear();
    }

    // -------------------------------------------------------------------------
    // Per-slot transition
    // -------------------------------------------------------------------------

    /// Rebind the slot at window `position` to logical `new_index`.
    fn setup(&mut self, position: usize, new_index: usize) {
        let Some(item) = self.active.get_mut(position) else {
            return;
        };

        if self.drag.is_dragging_index(new_index) || self.drag.dragged_slot() == Some(item.slot()) {
            if item.index == Some(new_index) {
                item.deferred = 0;
                return;
            }
            match self.config.max_drag_deferrals {
                Some(max) if item.deferred >= max => {
                    log::warn!(
                        "[recycler] {} deferred {} times by drag, forcing resync to {}",
                        item.slot(),
                        item.deferred,
                        new_index
                    );
                }
                _ => {
                    item.deferred += 1;
                    log::trace!("[recycler] {} held by drag, skipping {}", item.slot(), new_index);
                    return;
                }
            }
        }
        item.deferred = 0;

        let visual = item.visual();

        if new_index >= self.source.items_count() {
            if item.displayed {
                self.surface.set_displayed(visual, false);
                item.displayed = false;
            }
            if let Some(previous) = item.index {
                self.source.unbind_item(item, previous, &mut self.surface);
                item.index = None;
                item.id = None;
            }
            return;
        }

        if !item.displayed {
            self.surface.set_displayed(visual, true);
            item.displayed = true;
        }
        if item.index == Some(new_index) {
            return;
        }

        if self.config.alternating_rows {
            self.surface.set_class(visual, ALT_ROW_CLASS, new_index % 2 == 1);
        }

        let previous = item.index;
        let new_id = self.source.id_for_index(new_index);

        if let Some(previous) = previous {
            self.source.unbind_item(item, previous, &mut self.surface);
        }

        item.index = Some(new_index);
        item.id = Some(new_id);
        log::trace!("[recycler] {} {:?} -> {}", item.slot(), previous, new_index);

        // Keep child order in step with logical order.
        let target = new_index.saturating_sub(self.first_visible_index);
        if target >= self.surface.child_count() {
            self.surface.bring_to_front(visual);
        } else if let Some(occupant) = self.surface.child_at(target) {
            if occupant != visual {
                self.surface.place_behind(visual, occupant);
            }
        } else {
            self.surface.send_to_back(visual);
        }

        self.source.bind_item(item, new_index, &mut self.surface);

        match self.focus.action_for(new_index, previous) {
            FocusAction::None => {}
            FocusAction::Restore => {
                match self.surface.resolve_path(visual, self.focus.path()) {
                    Some(leaf) => {
                        if !self.surface.focus(leaf) {
                            log::debug!("[focus] {:?} refused focus for index {}", leaf, new_index);
                        }
                    }
                    None => {
                        log::debug!(
                            "[focus] path {:?} no longer resolves in index {}",
                            self.focus.path(),
                            new_index
                        );
                    }
                }
            }
            FocusAction::Blur => self.surface.blur(visual),
        }
    }

    // -------------------------------------------------------------------------
    // Pool primitives
    // -------------------------------------------------------------------------

    /// Acquire or create an item, attach its visual at `child_position` and
    /// insert it into the window at `active_position` (append when `None`).
    fn get_or_make_item_at_index(&mut self, active_position: Option<usize>, child_position: Option<usize>) {
        let item = match self.pool.acquire() {
            Some(item) => item,
            None => {
                let slot = self.pool.reserve_slot();
                let visual = self.source.make_item(slot, &mut self.surface);
                log::trace!("[recycler] made {} -> {:?}", slot, visual);
                self.pool.create(slot, visual)
            }
        };

        self.surface.insert_child(child_position, item.visual());
        self.active.insert(active_position, item);
    }

    /// Unbind the item at window `position` and return it to the pool.
    fn release_item(&mut self, position: usize) {
        let mut item = self.active.remove(position);
        if let Some(index) = item.index {
            self.source.unbind_item(&item, index, &mut self.surface);
            item.index = None;
        }
        self.surface.remove_child(item.visual());
        self.pool.release(item);
    }

    // -------------------------------------------------------------------------
    // Single-item replace
    // -------------------------------------------------------------------------

    /// Discard the visual of the row bound to `index` and materialize a
    /// replacement in the same window and child position.
    ///
    /// Returns false if no active item is bound to `index`.
    pub fn replace_active_item(&mut self, index: usize) -> bool {
        let Some(position) = self.active.position_of_index(index) else {
            return false;
        };

        let mut item = self.active.remove(position);
        let visual = item.visual();
        let child_position = self.surface.child_position(visual);
        log::debug!(
            "[recycler] replacing {} for index {} at child {:?}",
            item.slot(),
            index,
            child_position
        );

        if let Some(bound) = item.index.take() {
            self.source.unbind_item(&item, bound, &mut self.surface);
        }
        self.source.destroy_item(&item, &mut self.surface);
        self.surface.remove_child(visual);
        self.surface.destroy_visual(visual);

        self.get_or_make_item_at_index(Some(position), child_position);
        self.setup(position, index);
        true
    }

    // -------------------------------------------------------------------------
    // Background
    // -------------------------------------------------------------------------

    /// Recompute filler rows for the empty space below the last item.
    pub fn update_background(&mut self) {
        if !self.config.alternating_rows {
            self.filler.detach(&mut self.surface);
            return;
        }
        let fill_height = (self.viewport_height - self.content_height()) as f32;
        let last_index = self.active.last_displayed().and_then(|item| item.index());
        self.filler
            .update(&mut self.surface, fill_height, self.config.row_height, last_index);
    }

    // -------------------------------------------------------------------------
    // Focus notifications
    // -------------------------------------------------------------------------

    /// Input focus moved to `leaf`.
    pub fn on_focus(&mut self, leaf: S::Visual) {
        let Some(mut path) = self.surface.path_from_content(leaf) else {
            self.focus.clear();
            return;
        };
        if path.is_empty() {
            self.focus.clear();
            return;
        }

        let row = path.remove(0);
        let index = self
            .surface
            .child_at(row)
            .and_then(|root| self.active.position_of_visual(root))
            .and_then(|pos| self.active.get(pos))
            .and_then(|item| item.index());

        match index {
            Some(index) => self.focus.record(index, path),
            None => {
                self.focus.clear();
            }
        }
    }

    /// Focus is leaving; `about_to_receive` is the element gaining it, if any.
    pub fn on_blur(&mut self, about_to_receive: Option<S::Visual>) {
        let stays_inside = about_to_receive
            .map(|visual| self.surface.content_contains(visual))
            .unwrap_or(false);
        if !stays_inside {
            self.focus.clear();
        }
    }
}

impl<S, D, G> std::fmt::Debug for VirtualizationController<S, D, G>
where
    S: ScrollSurface,
    D: DataSource<S>,
    G: DragSource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualizationController")
            .field("config", &self.config)
            .field("first_visible_index", &self.first_visible_index)
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_height", &self.viewport_height)
            .field("active", &self.active.len())
            .field("idle", &self.pool.idle_count())
            .field("focused_index", &self.focus.last_focused_index())
            .finish()
    }
}
