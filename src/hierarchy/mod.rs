//! Hierarchy projection
//!
//! Turns the flat node list (id + parent link) into a rooted tree for a
//! rendering collaborator. One grouping pass; the engine never calls it.

use std::collections::HashMap;

use crate::tree::Node;

/// Node with its children attached
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct HierarchyNode<V> {
    /// Node snapshot
    pub node: Node<V>,
    /// Children ordered by id (left before right)
    pub children: Vec<HierarchyNode<V>>,
}

impl<V> HierarchyNode<V> {
    /// Number of nodes in this subtree
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::len).sum::<usize>()
    }

    /// Always false: a subtree holds at least its own root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Nodes in pre-order
    pub fn descendants(&self) -> Vec<&Node<V>> {
        let mut out = Vec::with_capacity(self.len());
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Node<V>>) {
        out.push(&self.node);
        for child in &self.children {
            child.collect(out);
        }
    }
}

/// Root the node list at the node without a parent
///
/// Returns `None` for an empty list. Nodes whose parent is missing from the
/// list are dropped.
pub fn project_hierarchy<V: Clone>(nodes: &[Node<V>]) -> Option<HierarchyNode<V>> {
    let root = nodes.iter().find(|node| node.parent.is_none())?;

    let mut children: HashMap<usize, Vec<&Node<V>>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent {
            children.entry(parent).or_default().push(node);
        }
    }
    for siblings in children.values_mut() {
        siblings.sort_by_key(|node| node.id);
    }

    Some(attach(root, &children))
}

fn attach<V: Clone>(node: &Node<V>, children: &HashMap<usize, Vec<&Node<V>>>) -> HierarchyNode<V> {
    HierarchyNode {
        node: node.clone(),
        children: children
            .get(&node.id)
            .map(|kids| kids.iter().map(|kid| attach(kid, children)).collect())
            .unwrap_or_default(),
    }
}
