use crate::dewey::DeweyId;

/// Index of a node inside its [XmlTree](crate::tree::XmlTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    /// An attribute flattened into a childless child of its element.
    Attribute,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    id: NodeId,
    kind: NodeKind,
    label: String,
    dewey_id: DeweyId,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn create_element(id: NodeId, label: &str, dewey_id: DeweyId, parent: Option<NodeId>) -> TreeNode {
        TreeNode {
            id,
            kind: NodeKind::Element,
            label: label.to_string(),
            dewey_id,
            text: None,
            parent,
            children: vec![],
        }
    }

    pub(crate) fn create_attribute(id: NodeId, label: String, dewey_id: DeweyId, value: String, parent: NodeId) -> TreeNode {
        TreeNode {
            id,
            kind: NodeKind::Attribute,
            label,
            dewey_id,
            text: Some(value),
            parent: Some(parent),
            children: vec![],
        }
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_attribute(&self) -> bool {
        self.kind == NodeKind::Attribute
    }

    /// Tag name for elements, lowercased attribute name for attributes.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dewey_id(&self) -> &DeweyId {
        &self.dewey_id
    }

    /// Trimmed text content of an element, or the normalised attribute value.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
