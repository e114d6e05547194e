use std::ops::Index;

use crate::dewey::DeweyId;
use crate::node::{NodeId, NodeKind, TreeNode};

/// A parsed document. Owns every node; relationships are [NodeId]s.
///
/// Nodes are stored in creation order, which is document order and therefore
/// also sorted by [DeweyId].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlTree {
    nodes: Vec<TreeNode>,
    completion_order: Vec<NodeId>,
}

impl XmlTree {
    pub(crate) fn new(nodes: Vec<TreeNode>, completion_order: Vec<NodeId>) -> XmlTree {
        debug_assert_eq!(nodes.len(), completion_order.len());
        XmlTree { nodes, completion_order }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<&TreeNode> {
        self.get(id)?.parent().map(|parent| &self[parent])
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item=&TreeNode> + '_ {
        self.get(id)
            .map(|node| node.children())
            .unwrap_or(&[])
            .iter()
            .map(move |child| &self[*child])
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// All nodes in the order they were completed: attributes as soon as their
    /// element opened, elements when their closing tag was seen.
    pub fn completion_order(&self) -> impl Iterator<Item=&TreeNode> + '_ {
        self.completion_order.iter().map(move |id| &self[*id])
    }

    pub fn completion_ids(&self) -> &[NodeId] {
        &self.completion_order
    }

    pub fn find(&self, dewey_id: &DeweyId) -> Option<&TreeNode> {
        self.nodes
            .binary_search_by(|node| node.dewey_id().cmp(dewey_id))
            .ok()
            .map(|pos| &self.nodes[pos])
    }

    /// Parent to child pairs in document order of the child.
    pub fn edges(&self) -> impl Iterator<Item=(NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .filter_map(|node| node.parent().map(|parent| (parent, node.id())))
    }

    pub fn element_count(&self) -> usize {
        self.count_kind(NodeKind::Element)
    }

    pub fn attribute_count(&self) -> usize {
        self.count_kind(NodeKind::Attribute)
    }

    fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind() == kind).count()
    }
}

impl Index<NodeId> for XmlTree {
    type Output = TreeNode;

    fn index(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }
}
