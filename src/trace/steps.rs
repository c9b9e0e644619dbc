//! Step snapshot types

use std::fmt;

use crate::{
    tree::{Node, NodeRange},
    visited::VisitedSet,
};

/// What a build step records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(tag = "kind", content = "node", rename_all = "lowercase"))]
pub enum BuildEvent {
    /// Node emitted in `Initial` state
    Enter(usize),
    /// Internal node switched to `Calculating`
    Split(usize),
    /// Leaf value assigned
    Leaf(usize),
    /// Children combined, node `Completed`
    Combine(usize),
    /// A child failed to complete; node left `Calculating`
    Stalled(usize),
}

impl BuildEvent {
    /// Node the event refers to
    pub fn node(&self) -> usize {
        match *self {
            BuildEvent::Enter(id)
            | BuildEvent::Split(id)
            | BuildEvent::Leaf(id)
            | BuildEvent::Combine(id)
            | BuildEvent::Stalled(id) => id,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BuildEvent::Enter(_) => "enter",
            BuildEvent::Split(_) => "split",
            BuildEvent::Leaf(_) => "leaf",
            BuildEvent::Combine(_) => "combine",
            BuildEvent::Stalled(_) => "stalled",
        }
    }
}

/// Full node-list snapshot taken during construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct BuildStep<V> {
    /// Event that produced the snapshot
    pub event: BuildEvent,
    /// Every node emitted so far, in emission order
    pub nodes: Vec<Node<V>>,
    /// Ids on the active recursion path
    pub highlight: Vec<usize>,
}

impl<V> BuildStep<V> {
    /// Snapshot of the node the event refers to
    pub fn node(&self) -> Option<&Node<V>> {
        let id = self.event.node();
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl<V: fmt::Display> fmt::Display for BuildStep<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} node {:<3}", self.event.label(), self.event.node())?;
        if let Some(node) = self.node() {
            write!(f, " {}", node)?;
        }
        write!(f, "  highlight={:?}", self.highlight)
    }
}

/// One side of a combination
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Operand<V> {
    /// Child id
    pub node: usize,
    /// Child range
    pub range: NodeRange,
    /// Value the child returned
    pub value: V,
}

impl<V: fmt::Display> fmt::Display for Operand<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.range, self.value)
    }
}

/// How a query step was resolved
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(tag = "kind", rename_all = "lowercase"))]
pub enum QueryOutcome<V> {
    /// Range outside the query; contributes the identity
    Disjoint,
    /// Range inside the query; stored aggregate returned directly
    Covered {
        /// Stored aggregate
        value: V,
    },
    /// Partial overlap; both children follow
    Split,
    /// Both children returned (post-order resolution entry)
    Combined {
        /// Left child result
        left: Operand<V>,
        /// Right child result
        right: Operand<V>,
        /// Rendered expression, e.g. `3 + 8`
        expression: String,
        /// Combined value
        value: V,
    },
}

/// Query step with per-node diagnostics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct QueryStep<V> {
    /// Current node id
    pub node: usize,
    /// Current node range
    pub range: NodeRange,
    /// Whether `range` intersects the query range
    pub intersects: bool,
    /// Nodes visited so far, this one included
    pub visited: VisitedSet,
    /// Active path (empty when the node is disjoint)
    pub highlight: Vec<usize>,
    /// Resolution of this step
    pub outcome: QueryOutcome<V>,
}

impl<V: Copy> QueryStep<V> {
    /// Value this step contributes, if it resolves one
    pub fn value(&self) -> Option<V> {
        match &self.outcome {
            QueryOutcome::Covered { value } | QueryOutcome::Combined { value, .. } => Some(*value),
            QueryOutcome::Disjoint | QueryOutcome::Split => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for QueryStep<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {:<3} {:<9}", self.node, self.range.to_string())?;
        match &self.outcome {
            QueryOutcome::Disjoint => write!(f, " disjoint")?,
            QueryOutcome::Covered { value } => write!(f, " covered -> {}", value)?,
            QueryOutcome::Split => write!(f, " split")?,
            QueryOutcome::Combined {
                left,
                right,
                expression,
                value,
            } => write!(
                f,
                " combine {} | {} : {} = {}",
                left.range, right.range, expression, value
            )?,
        }
        write!(
            f,
            "  visited={:?} highlight={:?}",
            self.visited.to_vec(),
            self.highlight
        )
    }
}

/// Update step: path and visited bookkeeping only
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct UpdateStep {
    /// Current node id
    pub node: usize,
    /// Current node range
    pub range: NodeRange,
    /// Whether `range` contains the updated index
    pub covers: bool,
    /// Nodes visited so far, this one included
    pub visited: VisitedSet,
    /// Active path (empty when the node does not cover the index)
    pub highlight: Vec<usize>,
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {:<3} {:<9} {}  visited={:?} highlight={:?}",
            self.node,
            self.range.to_string(),
            if self.covers { "covers" } else { "skip" },
            self.visited.to_vec(),
            self.highlight
        )
    }
}
