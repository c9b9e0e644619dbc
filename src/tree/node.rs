//! Tree positions
//!
//! Range = [start, end] ⊆ [0, n-1], inclusive
//! Children computed via midpoint: m = ⌊(start + end) / 2⌋
//!   Left child: [start, m]
//!   Right child: [m+1, end]

use std::fmt;

/// Inclusive leaf-index range covered by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeRange {
    /// First covered leaf index (inclusive)
    pub start: usize,

    /// Last covered leaf index (inclusive)
    pub end: usize,
}

impl NodeRange {
    /// Create range `[start, end]`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "empty range [{start}:{end}]");
        Self { start, end }
    }

    /// Root range for `n` leaves, `None` when there is nothing to cover
    pub fn root(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|end| Self { start: 0, end })
    }

    /// Check if leaf (unit range)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.start == self.end
    }

    /// Number of covered leaves
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Split point `⌊(start + end) / 2⌋`
    #[inline]
    pub fn midpoint(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    /// Get children via midpoint split
    ///
    /// Returns: ([start, mid], [mid+1, end])
    pub fn split(&self) -> (NodeRange, NodeRange) {
        debug_assert!(!self.is_leaf(), "Leaf has no children");

        let mid = self.midpoint();
        (
            NodeRange {
                start: self.start,
                end: mid,
            },
            NodeRange {
                start: mid + 1,
                end: self.end,
            },
        )
    }

    /// Whether leaf `index` falls inside the range
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Whether the range shares at least one index with `[qs, qe]`
    #[inline]
    pub fn intersects(&self, qs: usize, qe: usize) -> bool {
        !(self.end < qs || self.start > qe)
    }

    /// Whether the range lies entirely inside `[qs, qe]`
    #[inline]
    pub fn is_within(&self, qs: usize, qe: usize) -> bool {
        qs <= self.start && self.end <= qe
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "[{}]", self.start)
        } else {
            write!(f, "[{}:{}]", self.start, self.end)
        }
    }
}

/// Lifecycle of a node during construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "lowercase"))]
pub enum NodeStatus {
    /// Emitted, nothing computed yet
    Initial,
    /// Waiting on children
    Calculating,
    /// Aggregate known
    Completed,
}

/// Node snapshot: position, parent link and aggregate
///
/// `value` is `Some` iff `status == Completed`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Node<V> {
    /// Array index (0 = root)
    pub id: usize,
    /// Parent id, `None` only for the root
    pub parent: Option<usize>,
    /// Covered leaf range
    pub range: NodeRange,
    /// Aggregate over `range`
    pub value: Option<V>,
    /// Construction state
    pub status: NodeStatus,
}

impl<V> Node<V> {
    pub(crate) fn initial(id: usize, parent: Option<usize>, range: NodeRange) -> Self {
        Self {
            id,
            parent,
            range,
            value: None,
            status: NodeStatus::Initial,
        }
    }

    /// Check if leaf
    pub fn is_leaf(&self) -> bool {
        self.range.is_leaf()
    }

    /// Check if this is the root
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl<V: fmt::Display> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} = {}", self.range, value),
            None => write!(f, "{} = ?", self.range),
        }
    }
}
