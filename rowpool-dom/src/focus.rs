use crate::dom::{Dom, NodeId};

/// Tracks which node is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Programmatically focus a node.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.focused == Some(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next node in `focusable` (Tab navigation), wrapping around.
    /// Returns the newly focused node if focus changed.
    pub fn focus_next(&mut self, focusable: &[NodeId]) -> Option<NodeId> {
        if focusable.is_empty() {
            return None;
        }

        let new_focus = match self.focused {
            None => focusable[0],
            Some(current) => match focusable.iter().position(|id| *id == current) {
                Some(i) => focusable[(i + 1) % focusable.len()],
                None => focusable[0],
            },
        };

        self.focus(new_focus).then_some(new_focus)
    }

    /// Focus the previous node in `focusable` (Shift+Tab navigation).
    /// Returns the newly focused node if focus changed.
    pub fn focus_prev(&mut self, focusable: &[NodeId]) -> Option<NodeId> {
        if focusable.is_empty() {
            return None;
        }

        let last = focusable.len() - 1;
        let new_focus = match self.focused {
            None => focusable[last],
            Some(current) => match focusable.iter().position(|id| *id == current) {
                Some(0) | None => focusable[last],
                Some(i) => focusable[i - 1],
            },
        };

        self.focus(new_focus).then_some(new_focus)
    }
}

/// Collect focusable, rendered nodes under `root` in tree order.
pub fn collect_focusable(dom: &Dom, root: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    collect_focusable_recursive(dom, root, &mut result);
    result
}

fn collect_focusable_recursive(dom: &Dom, id: NodeId, result: &mut Vec<NodeId>) {
    if !dom.is_displayed(id) {
        return;
    }
    if dom.is_focusable(id) {
        result.push(id);
    }
    for child in dom.children(id) {
        collect_focusable_recursive(dom, *child, result);
    }
}
