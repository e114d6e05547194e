//! Text views of a parsed tree for renderers and the command line.

use std::fmt::Write;

use termtree::Tree;

use crate::node::{NodeId, TreeNode};
use crate::tree::XmlTree;

/// Deepest tree [to_termtree] converts. `termtree::Tree` is dropped recursively.
pub const TERMTREE_MAX_DEPTH: usize = 256;

/// The label a renderer shows for a node: the label, followed by the quoted text if any.
pub fn display_label(node: &TreeNode) -> String {
    match node.text() {
        Some(text) => format!("{}\"{}\"", node.label(), text),
        None => node.label().to_string(),
    }
}

fn line(node: &TreeNode) -> String {
    format!("{} [{}]", display_label(node), node.dewey_id())
}

/// The tree as a `termtree::Tree`, or `None` if it is empty or nested deeper
/// than [TERMTREE_MAX_DEPTH].
pub fn to_termtree(tree: &XmlTree) -> Option<Tree<String>> {
    let max_depth = tree.nodes().iter().map(|node| node.dewey_id().depth()).max()?;
    if max_depth > TERMTREE_MAX_DEPTH {
        return None;
    }

    // children always come after their parent, so build from the back
    let mut built: Vec<Option<Tree<String>>> = (0..tree.len()).map(|_| None).collect();
    for node in tree.nodes().iter().rev() {
        let leaves: Vec<Tree<String>> = node.children()
            .iter()
            .filter_map(|child| built[child.index()].take())
            .collect();
        built[node.id().index()] = Some(Tree::new(line(node)).with_leaves(leaves));
    }
    built.into_iter().next().flatten()
}

/// Indented outline of the whole tree, in the same layout as `termtree`;
/// empty for an empty tree. Works for any nesting depth.
pub fn render(tree: &XmlTree) -> String {
    let root = match tree.root() {
        Some(root) => root,
        None => return String::new(),
    };

    let mut out = String::new();
    // (node, depth, last among its siblings)
    let mut stack: Vec<(NodeId, usize, bool)> = vec![(root.id(), 0, true)];
    // last-sibling flag of the ancestor at each depth
    let mut ancestors_last: Vec<bool> = vec![];
    while let Some((id, depth, last)) = stack.pop() {
        ancestors_last.truncate(depth);
        if depth > 0 {
            for &ancestor_last in &ancestors_last[1..] {
                out.push_str(if ancestor_last { "    " } else { "│   " });
            }
            out.push_str(if last { "└── " } else { "├── " });
        }
        let node = &tree[id];
        out.push_str(&line(node));
        out.push('\n');
        ancestors_last.push(last);

        let children = node.children();
        for (i, child) in children.iter().enumerate().rev() {
            stack.push((*child, depth + 1, i + 1 == children.len()));
        }
    }
    out
}

/// One line per node in completion order: dewey id, label and text, tab separated.
pub fn listing(tree: &XmlTree) -> String {
    let mut out = String::new();
    for node in tree.completion_order() {
        let _ = writeln!(out, "{}\t{}\t{}", node.dewey_id(), node.label(), node.text().unwrap_or_default());
    }
    out
}

/// One `parent -> child` line per edge, by dewey id.
pub fn edge_list(tree: &XmlTree) -> String {
    let mut out = String::new();
    for (parent, child) in tree.edges() {
        let _ = writeln!(out, "{} -> {}", tree[parent].dewey_id(), tree[child].dewey_id());
    }
    out
}
