/// Declarative description of a subtree, instantiated with
/// [`Dom::instantiate`](crate::Dom::instantiate).
#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub name: String,

    // Content
    pub text: Option<String>,
    pub children: Vec<Element>,

    // Visual
    pub classes: Vec<String>,
    pub height: Option<f32>,

    // Interaction
    pub focusable: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            name: "el".to_string(),
            text: None,
            children: Vec::new(),
            classes: Vec::new(),
            height: None,
            focusable: false,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            name: "box".to_string(),
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            name: "row".to_string(),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            name: "text".to_string(),
            text: Some(content.into()),
            ..Default::default()
        }
    }

    /// A focusable text element.
    pub fn button(label: impl Into<String>) -> Self {
        Self {
            name: "button".to_string(),
            text: Some(label.into()),
            focusable: true,
            ..Default::default()
        }
    }

    pub fn id(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }
}
