use std::collections::BTreeSet;

use rowpool::ScrollSurface;

use crate::element::Element;
use crate::event::FocusEvent;
use crate::focus::{collect_focusable, FocusState};

/// Handle to a node in a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Node {
    name: String,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: BTreeSet<String>,
    height: Option<f32>,
    displayed: bool,
    focusable: bool,
}

impl Node {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::new(),
            height: None,
            displayed: true,
            focusable: false,
        }
    }
}

/// Arena-backed element tree shaped like a scroll view:
///
/// ```text
/// viewport
/// ├── content   (row roots, in logical order)
/// └── filler    (attached only while background rows are needed)
/// ```
///
/// Destroyed nodes leave a hole; their ids are never reused.
#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Option<Node>>,
    viewport: NodeId,
    content: NodeId,
    filler: NodeId,
    focus: FocusState,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            viewport: NodeId(0),
            content: NodeId(0),
            filler: NodeId(0),
            focus: FocusState::new(),
        };
        dom.viewport = dom.alloc(Node::new("viewport"));
        dom.content = dom.alloc(Node::new("content"));
        dom.filler = dom.alloc(Node::new("filler"));
        dom.append_child(dom.viewport, dom.content);
        dom
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn viewport(&self) -> NodeId {
        self.viewport
    }

    pub fn content(&self) -> NodeId {
        self.content
    }

    pub fn filler(&self) -> NodeId {
        self.filler
    }

    /// Build a detached subtree from `element`.
    pub fn instantiate(&mut self, element: &Element) -> NodeId {
        let mut node = Node::new(element.name.clone());
        node.text = element.text.clone();
        node.classes = element.classes.iter().cloned().collect();
        node.height = element.height;
        node.focusable = element.focusable;
        let id = self.alloc(node);

        for child in &element.children {
            let child_id = self.instantiate(child);
            self.append_child(id, child_id);
        }
        id
    }

    /// Attach `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, None, child);
    }

    fn insert_at(&mut self, parent: NodeId, position: Option<usize>, child: NodeId) {
        if parent == child || self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(parent) {
            let position = position.unwrap_or(node.children.len()).min(node.children.len());
            node.children.insert(position, child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Remove `id` from its parent's children. The node stays alive.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, including the three structural ones.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Find the first node named `name` under `root`, in tree order.
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let node = self.node(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children.iter().find_map(|child| self.find(*child, name))
    }

    // -------------------------------------------------------------------------
    // Node state
    // -------------------------------------------------------------------------

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.into());
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.contains(class))
    }

    pub fn height(&self, id: NodeId) -> Option<f32> {
        self.node(id).and_then(|n| n.height)
    }

    pub fn is_displayed(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.displayed)
    }

    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.focusable)
    }

    /// Displayed itself, along with every ancestor up to the viewport.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if !self.is_displayed(node) {
                return false;
            }
            if node == self.viewport {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Content children that are displayed, in child order.
    pub fn displayed_rows(&self) -> Vec<NodeId> {
        self.children(self.content)
            .iter()
            .copied()
            .filter(|id| self.is_displayed(*id))
            .collect()
    }

    /// Filler rows currently rendered.
    pub fn displayed_filler_rows(&self) -> Vec<NodeId> {
        if self.parent(self.filler) != Some(self.viewport) {
            return Vec::new();
        }
        self.children(self.filler)
            .iter()
            .copied()
            .filter(|id| self.is_displayed(*id))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Move focus to `id` as if the user clicked it.
    pub fn set_focus(&mut self, id: NodeId) -> Vec<FocusEvent> {
        if !self.is_focusable(id) || !self.is_rendered(id) {
            return Vec::new();
        }
        let old = self.focus.focused();
        if !self.focus.focus(id) {
            return Vec::new();
        }
        let mut events = Vec::new();
        if let Some(old) = old {
            events.push(FocusEvent::Blur {
                target: old,
                new_target: Some(id),
            });
        }
        events.push(FocusEvent::Focus { target: id });
        events
    }

    /// Tab (or Shift+Tab with `backwards`) through focusable nodes.
    pub fn tab(&mut self, backwards: bool) -> Vec<FocusEvent> {
        let focusable = collect_focusable(self, self.viewport);
        let old = self.focus.focused();
        let new = if backwards {
            self.focus.focus_prev(&focusable)
        } else {
            self.focus.focus_next(&focusable)
        };

        let mut events = Vec::new();
        if let Some(new) = new {
            if let Some(old) = old {
                events.push(FocusEvent::Blur {
                    target: old,
                    new_target: Some(new),
                });
            }
            events.push(FocusEvent::Focus { target: new });
        }
        events
    }

    /// Drop focus entirely (Escape).
    pub fn escape(&mut self) -> Vec<FocusEvent> {
        match self.focus.focused() {
            Some(old) => {
                self.focus.blur();
                vec![FocusEvent::Blur {
                    target: old,
                    new_target: None,
                }]
            }
            None => Vec::new(),
        }
    }

    fn destroy_subtree(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.destroy_subtree(child);
        }
        if self.focus.focused() == Some(id) {
            self.focus.blur();
        }
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = None;
        }
    }
}

impl ScrollSurface for Dom {
    type Visual = NodeId;

    fn child_count(&self) -> usize {
        self.children(self.content).len()
    }

    fn child_at(&self, position: usize) -> Option<NodeId> {
        self.children(self.content).get(position).copied()
    }

    fn child_position(&self, visual: NodeId) -> Option<usize> {
        self.children(self.content).iter().position(|c| *c == visual)
    }

    fn insert_child(&mut self, position: Option<usize>, visual: NodeId) {
        self.insert_at(self.content, position, visual);
    }

    fn remove_child(&mut self, visual: NodeId) {
        if self.parent(visual) == Some(self.content) {
            self.detach(visual);
        }
    }

    fn clear_children(&mut self) {
        for child in self.children(self.content).to_vec() {
            self.detach(child);
        }
    }

    fn bring_to_front(&mut self, visual: NodeId) {
        if self.parent(visual) == Some(self.content) {
            self.insert_at(self.content, None, visual);
        }
    }

    fn send_to_back(&mut self, visual: NodeId) {
        if self.parent(visual) == Some(self.content) {
            self.insert_at(self.content, Some(0), visual);
        }
    }

    fn place_behind(&mut self, visual: NodeId, sibling: NodeId) {
        if visual == sibling || self.parent(visual) != Some(self.content) {
            return;
        }
        self.detach(visual);
        match self.child_position(sibling) {
            Some(position) => self.insert_at(self.content, Some(position), visual),
            None => self.insert_at(self.content, None, visual),
        }
    }

    fn set_displayed(&mut self, visual: NodeId, displayed: bool) {
        if let Some(node) = self.node_mut(visual) {
            node.displayed = displayed;
        }
        if !displayed {
            self.blur(visual);
        }
    }

    fn set_class(&mut self, visual: NodeId, class: &str, enabled: bool) {
        if let Some(node) = self.node_mut(visual) {
            if enabled {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn set_height(&mut self, visual: NodeId, height: f32) {
        if let Some(node) = self.node_mut(visual) {
            node.height = Some(height);
        }
    }

    fn destroy_visual(&mut self, visual: NodeId) {
        if visual == self.viewport || visual == self.content || visual == self.filler {
            log::warn!("[dom] refusing to destroy structural node {}", visual);
            return;
        }
        self.detach(visual);
        self.destroy_subtree(visual);
    }

    fn path_from_content(&self, leaf: NodeId) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = leaf;
        while current != self.content {
            let parent = self.parent(current)?;
            let position = self.children(parent).iter().position(|c| *c == current)?;
            path.push(position);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    fn resolve_path(&self, root: NodeId, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(root, |node, position| self.children(node).get(*position).copied())
            .filter(|id| self.is_alive(*id))
    }

    fn content_contains(&self, visual: NodeId) -> bool {
        self.is_within(visual, self.content)
    }

    fn focus(&mut self, visual: NodeId) -> bool {
        if !self.is_focusable(visual) || !self.is_rendered(visual) {
            return false;
        }
        self.focus.focus(visual);
        true
    }

    fn blur(&mut self, visual: NodeId) {
        if self
            .focus
            .focused()
            .is_some_and(|focused| self.is_within(focused, visual))
        {
            self.focus.blur();
        }
    }

    fn make_filler_row(&mut self) -> NodeId {
        let row = self.alloc(Node::new("filler-row"));
        self.append_child(self.filler, row);
        row
    }

    fn set_filler_attached(&mut self, attached: bool) {
        if attached {
            if self.parent(self.filler) != Some(self.viewport) {
                self.append_child(self.viewport, self.filler);
            }
        } else {
            self.detach(self.filler);
        }
    }
}
