//! Tree engine
//!
//! Owns the tree array for one operator and runs the three recursive
//! algorithms over it:
//! 1. **Build**: midpoint partition, leaves first, combine on unwind
//! 2. **Query**: decompose [qs, qe] into canonical segments and fold them
//! 3. **Update**: assign one leaf, recombine every ancestor on unwind
//!
//! Each call returns its own [`Trace`](crate::trace::Trace). Calls must be
//! serialized by the caller; there is no internal locking.

mod build;
mod query;
mod update;

pub use query::QueryResult;

use crate::{
    algebra::Combiner,
    tree::{Node, NodeStatus, Storage},
    TreeConfig,
};

/// Segment tree over one [`Combiner`]
#[derive(Debug, Clone)]
pub struct SegmentTree<C: Combiner> {
    combiner: C,
    config: TreeConfig,
    /// Leaf count of the last build
    len: usize,
    storage: Storage<C::Value>,
    /// Node metadata in emission (pre-)order
    nodes: Vec<Node<C::Value>>,
}

impl<C: Combiner> SegmentTree<C> {
    /// Create an unbuilt tree with the default configuration
    pub fn new(combiner: C) -> Self {
        Self::with_config(combiner, TreeConfig::default())
    }

    /// Create an unbuilt tree
    pub fn with_config(combiner: C, config: TreeConfig) -> Self {
        Self {
            combiner,
            config,
            len: 0,
            storage: Storage::default(),
            nodes: Vec::new(),
        }
    }

    /// Operator in use
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// Configuration in use
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no leaves (unbuilt or built from nothing)
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw tree array; `None` slots were never written
    pub fn tree_array(&self) -> &[Option<C::Value>] {
        self.storage.as_slice()
    }

    /// Aggregate stored at node `id`
    pub fn aggregate(&self, id: usize) -> Option<C::Value> {
        self.storage.get(id)
    }

    /// Aggregate of the whole sequence
    pub fn root_value(&self) -> Option<C::Value> {
        if self.is_empty() {
            None
        } else {
            self.storage.get(0)
        }
    }

    /// Node list in emission order
    ///
    /// Completed nodes read their value from the tree array, so the list
    /// reflects every update applied since the build.
    pub fn nodes(&self) -> Vec<Node<C::Value>> {
        self.nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                if node.status == NodeStatus::Completed {
                    node.value = self.storage.get(node.id);
                }
                node
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algebra::Sum, input::leaves_from_values};

    #[test]
    fn test_unbuilt_tree_is_empty() {
        let tree = SegmentTree::new(Sum);
        assert!(tree.is_empty());
        assert!(tree.tree_array().is_empty());
        assert!(tree.nodes().is_empty());
        assert_eq!(tree.root_value(), None);
    }

    #[test]
    fn test_nodes_follow_updates() {
        let mut tree = SegmentTree::new(Sum);
        tree.build(&leaves_from_values(&[5, 3, 8, 2]));
        tree.update(2, 10).unwrap();

        let nodes = tree.nodes();
        let root = nodes.iter().find(|n| n.id == 0).unwrap();
        assert_eq!(root.value, Some(20));
        let leaf = nodes
            .iter()
            .find(|n| n.range.is_leaf() && n.range.start == 2)
            .unwrap();
        assert_eq!(leaf.value, Some(10));
    }
}
