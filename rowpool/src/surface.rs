//! Collaborator interfaces supplied by the host.
//!
//! The controller drives three collaborators it does not own the semantics of:
//!
//! ```text
//! ScrollSurface   owns the visual tree, accepts insert/remove/reorder
//! DataSource      owns item data and identity, binds visuals to indices
//! DragSource      reports rows currently relocated by a drag/reorder
//! ```
//!
//! All calls happen synchronously on the thread that drives the controller.
//! Callbacks must not re-enter the controller.

use crate::item::{ItemId, PooledItem, SlotId};

/// The scrollable container hosting row visuals.
///
/// Visuals are referred to by handle; the surface owns them. "Content"
/// means the container holding row roots, whose child order is the paint and
/// tab order of the rows.
pub trait ScrollSurface {
    /// Handle to a visual owned by the surface.
    type Visual: Copy + Eq + std::fmt::Debug;

    // -------------------------------------------------------------------------
    // Content children
    // -------------------------------------------------------------------------

    /// Number of row roots attached to the content container.
    fn child_count(&self) -> usize;

    /// Row root at `position` in the content container.
    fn child_at(&self, position: usize) -> Option<Self::Visual>;

    /// Position of `visual` among the content container's children.
    fn child_position(&self, visual: Self::Visual) -> Option<usize>;

    /// Attach `visual` at `position`, or append when `None`.
    fn insert_child(&mut self, position: Option<usize>, visual: Self::Visual);

    /// Detach `visual` from the content container (the visual stays alive).
    fn remove_child(&mut self, visual: Self::Visual);

    /// Detach every row root.
    fn clear_children(&mut self);

    /// Move `visual` to the end of the content children.
    fn bring_to_front(&mut self, visual: Self::Visual);

    /// Move `visual` to the start of the content children.
    fn send_to_back(&mut self, visual: Self::Visual);

    /// Move `visual` immediately before `sibling`.
    fn place_behind(&mut self, visual: Self::Visual, sibling: Self::Visual);

    // -------------------------------------------------------------------------
    // Visual state
    // -------------------------------------------------------------------------

    fn set_displayed(&mut self, visual: Self::Visual, displayed: bool);

    fn set_class(&mut self, visual: Self::Visual, class: &str, enabled: bool);

    fn set_height(&mut self, visual: Self::Visual, height: f32);

    /// Permanently discard a visual and its subtree.
    fn destroy_visual(&mut self, visual: Self::Visual);

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Child positions leading from the content container down to `leaf`.
    ///
    /// The first segment is the row root's position in the content. Returns
    /// `None` if `leaf` is not inside the content.
    fn path_from_content(&self, leaf: Self::Visual) -> Option<Vec<usize>>;

    /// Follow child positions `path` starting at `root`.
    fn resolve_path(&self, root: Self::Visual, path: &[usize]) -> Option<Self::Visual>;

    /// Whether `visual` is the content container or one of its descendants.
    fn content_contains(&self, visual: Self::Visual) -> bool;

    /// Give input focus to `visual`. Returns false if it cannot take focus.
    fn focus(&mut self, visual: Self::Visual) -> bool;

    /// Drop focus if it is on `visual` or inside its subtree.
    fn blur(&mut self, visual: Self::Visual);

    // -------------------------------------------------------------------------
    // Background filler
    // -------------------------------------------------------------------------

    /// Create a new row inside the filler container.
    fn make_filler_row(&mut self) -> Self::Visual;

    /// Attach or detach the filler container from the viewport.
    fn set_filler_attached(&mut self, attached: bool);
}

/// Supplier of logical items and the per-row callbacks.
pub trait DataSource<S: ScrollSurface> {
    fn items_count(&self) -> usize;

    fn id_for_index(&self, index: usize) -> ItemId;

    /// False while the source is not ready to bind (e.g. mid-reload).
    fn has_valid_bindings(&self) -> bool {
        true
    }

    /// Changes whenever bound data may be stale. Sources that do not track
    /// revisions rely on [`VirtualizationController::invalidate`](crate::VirtualizationController::invalidate).
    fn revision(&self) -> u64 {
        0
    }

    /// Create the visual for a new pooled item. Called exactly once per item.
    fn make_item(&mut self, slot: SlotId, surface: &mut S) -> S::Visual;

    /// Populate the item's visual from the data at `index`.
    fn bind_item(&mut self, item: &PooledItem<S::Visual>, index: usize, surface: &mut S);

    /// Release whatever `bind_item` acquired for `index`.
    fn unbind_item(&mut self, item: &PooledItem<S::Visual>, index: usize, surface: &mut S);

    /// The item's visual is about to be discarded for good.
    fn destroy_item(&mut self, item: &PooledItem<S::Visual>, surface: &mut S);
}

/// Drag/reorder subsystem, queried before a slot is rebound.
pub trait DragSource {
    /// Whether the row at `index` is being relocated by a drag.
    fn is_dragging_index(&self, index: usize) -> bool;

    /// The pooled item being dragged, if any.
    fn dragged_slot(&self) -> Option<SlotId>;
}

/// Drag source for hosts without reordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDrag;

impl DragSource for NoDrag {
    fn is_dragging_index(&self, _index: usize) -> bool {
        false
    }

    fn dragged_slot(&self) -> Option<SlotId> {
        None
    }
}
