use tracing::trace;

use crate::dewey::DeweyId;
use crate::error::BuildError;
use crate::event::{Attribute, XmlEventSink};
use crate::node::{NodeId, TreeNode};
use crate::tree::XmlTree;
use crate::xmlchar::trim_xml_whitespace;

/// Builds an [XmlTree] from open/text/close events using a stack of the
/// currently open elements.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<TreeNode>,
    open: Vec<NodeId>,
    completed: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Ends the event stream. Fails if any element is still open.
    pub fn finish(self) -> Result<XmlTree, BuildError> {
        if !self.open.is_empty() {
            let labels = self.open
                .iter()
                .map(|id| self.nodes[id.0].label().to_string())
                .collect();
            return Err(BuildError::UnclosedElements(labels));
        }
        Ok(XmlTree::new(self.nodes, self.completed))
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len())
    }

    fn push_element(&mut self, name: &str) -> Result<NodeId, BuildError> {
        let id = self.next_id();
        let node = match self.open.last() {
            None if !self.nodes.is_empty() => return Err(BuildError::MultipleRoots(name.to_string())),
            None => TreeNode::create_element(id, name, DeweyId::root(), None),
            Some(&parent_id) => {
                let parent = &mut self.nodes[parent_id.0];
                let ordinal = parent.children().len() as u32 + 1;
                let dewey_id = parent.dewey_id().child(ordinal);
                parent.push_child(id);
                TreeNode::create_element(id, name, dewey_id, Some(parent_id))
            }
        };
        trace!(label = name, dewey_id = %node.dewey_id(), "open element");
        self.nodes.push(node);
        self.open.push(id);
        Ok(id)
    }

    fn push_attribute(&mut self, element_id: NodeId, position: usize, attribute: &Attribute) {
        let id = self.next_id();
        let element = &mut self.nodes[element_id.0];
        // attributes arrive with the open event, before any child element
        debug_assert_eq!(element.children().len(), position - 1);
        let dewey_id = element.dewey_id().child(position as u32);
        element.push_child(id);

        let label = attribute.name.to_lowercase();
        let value = trim_xml_whitespace(&attribute.value.to_lowercase()).to_string();
        trace!(label = %label, dewey_id = %dewey_id, "attribute");
        self.nodes.push(TreeNode::create_attribute(id, label, dewey_id, value, element_id));
        self.completed.push(id);
    }
}

impl XmlEventSink for TreeBuilder {
    fn on_element_open(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), BuildError> {
        let element_id = self.push_element(name)?;
        for (i, attribute) in attributes.iter().enumerate() {
            self.push_attribute(element_id, i + 1, attribute);
        }
        Ok(())
    }

    /// Only non-empty trimmed chunks replace the text of the innermost open element.
    fn on_text(&mut self, text: &str) -> Result<(), BuildError> {
        let text = trim_xml_whitespace(text);
        if text.is_empty() {
            return Ok(());
        }
        match self.open.last() {
            Some(id) => {
                self.nodes[id.0].set_text(text);
                Ok(())
            }
            None => Err(BuildError::TextOutsideRoot(text.to_string())),
        }
    }

    fn on_element_close(&mut self, name: &str) -> Result<(), BuildError> {
        let id = match self.open.last() {
            Some(id) => *id,
            None => return Err(BuildError::UnexpectedEndTag(name.to_string())),
        };
        let node = &self.nodes[id.0];
        if node.label() != name {
            return Err(BuildError::NonMatchingTags {
                expected: node.label().to_string(),
                found: name.to_string(),
            });
        }
        trace!(label = name, dewey_id = %node.dewey_id(), "close element");
        self.open.pop();
        self.completed.push(id);
        Ok(())
    }
}
