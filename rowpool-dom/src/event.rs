use crate::dom::NodeId;

/// Focus changes produced by keyboard navigation, to be routed to the
/// controller's `on_focus` / `on_blur`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEvent {
    /// Element gained focus
    Focus { target: NodeId },
    /// Element lost focus; `new_target` is about to receive it
    Blur {
        target: NodeId,
        new_target: Option<NodeId>,
    },
}
