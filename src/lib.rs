//! # Traced Segment Tree
//!
//! A segment tree over an ordered sequence of values that answers
//! associative range queries, applies point updates, and records every
//! internal step so an external consumer (animation player, test harness,
//! logger) can replay the execution exactly.
//!
//! ## Core Algorithm
//!
//! 1. **Storage**: flat array, node `i` has children `2i+1` and `2i+2`,
//!    capacity ≥ 4n
//! 2. **Build**: midpoint recursion, combine on unwind
//! 3. **Query**: canonical-segment decomposition, O(log n) nodes
//! 4. **Update**: point assignment, recombine ancestors on unwind
//!
//! The operator is any [`Combiner`]: associative with an identity.
//!
//! ## Usage Example
//!
//! ```
//! use segtrace::{input::leaves_from_values, SegmentTree, Sum};
//!
//! let mut tree = SegmentTree::new(Sum);
//! let build = tree.build(&leaves_from_values(&[5, 3, 8, 2]));
//! assert!(!build.is_empty());
//!
//! let result = tree.query(1, 2)?;
//! assert_eq!(result.value, 11);
//!
//! tree.update(2, 10)?;
//! assert_eq!(tree.query(0, 3)?.value, 20);
//! # Ok::<(), segtrace::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod algebra;    // Combine operators
pub mod tree;       // Array layout and node model
pub mod visited;    // Visited-node bit set
pub mod trace;      // Step snapshots
pub mod engine;     // Build / query / update
pub mod hierarchy;  // Flat list -> rooted tree
pub mod input;      // Leaf sequences and groups

// Re-exports for convenience
pub use algebra::{Combiner, Max, Min, Sum, WideSum};
pub use engine::{QueryResult, SegmentTree};
pub use hierarchy::{project_hierarchy, HierarchyNode};
pub use input::Leaf;
pub use trace::{BuildTrace, QueryTrace, Trace, UpdateTrace};
pub use tree::{Node, NodeRange, NodeStatus};

use thiserror::Error;

/// Errors reported at operation entry points
///
/// All are caller preconditions, checked before any recursion starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Malformed leaf input
    #[error("invalid leaf input: {0}")]
    Input(String),

    /// Query bounds outside `0 ≤ start ≤ end < len`
    ///
    /// Bounds are signed so that negative positions entered by a user are
    /// reported as given.
    #[error("invalid query range [{start}:{end}] for {len} leaves")]
    Range {
        /// Requested start (inclusive)
        start: i64,
        /// Requested end (inclusive)
        end: i64,
        /// Leaf count of the current build
        len: usize,
    },

    /// Update index outside `0 ≤ index < len`
    #[error("update index {index} out of range for {len} leaves")]
    Index {
        /// Requested index
        index: i64,
        /// Leaf count of the current build
        len: usize,
    },

    /// Configuration invalid (e.g., capacity factor outside 4..=64)
    #[error("invalid tree configuration: {0}")]
    InvalidConfiguration(String),
}

/// Position as reported in [`TreeError`]; saturates above `i64::MAX`
pub(crate) fn signed(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}

/// Configuration parameters for a tree instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    capacity_factor: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            capacity_factor: tree::MIN_CAPACITY_FACTOR,
        }
    }
}

impl TreeConfig {
    /// Set slots per leaf
    ///
    /// Below 4 some recursively addressed ids would fall outside the array;
    /// above 64 the extra slots are never addressed.
    pub fn with_capacity_factor(mut self, capacity_factor: usize) -> Result<Self, TreeError> {
        if capacity_factor < tree::MIN_CAPACITY_FACTOR {
            return Err(TreeError::InvalidConfiguration(format!(
                "capacity factor {} is below the minimum of {}",
                capacity_factor,
                tree::MIN_CAPACITY_FACTOR
            )));
        }
        if capacity_factor > tree::MAX_CAPACITY_FACTOR {
            return Err(TreeError::InvalidConfiguration(format!(
                "capacity factor {} is above the maximum of {}",
                capacity_factor,
                tree::MAX_CAPACITY_FACTOR
            )));
        }
        self.capacity_factor = capacity_factor;
        Ok(self)
    }

    /// Tree array slots per leaf
    pub fn capacity_factor(&self) -> usize {
        self.capacity_factor
    }

    /// Slots allocated for `len` leaves
    pub fn capacity_for(&self, len: usize) -> usize {
        self.capacity_factor.saturating_mul(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = TreeConfig::default();
        assert_eq!(config.capacity_factor(), 4);
        assert_eq!(config.capacity_for(5), 20);
    }

    #[test]
    fn test_capacity_factor_validation() {
        assert!(TreeConfig::default().with_capacity_factor(8).is_ok());
        assert!(matches!(
            TreeConfig::default().with_capacity_factor(3),
            Err(TreeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_oversized_capacity_factor_rejected() {
        let max = TreeConfig::default().with_capacity_factor(64).unwrap();
        assert_eq!(max.capacity_for(3), 192);

        for factor in [65, usize::MAX / 2 + 1, usize::MAX] {
            assert!(
                matches!(
                    TreeConfig::default().with_capacity_factor(factor),
                    Err(TreeError::InvalidConfiguration(_))
                ),
                "factor {factor} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = TreeError::Range {
            start: 3,
            end: 1,
            len: 4,
        };
        assert_eq!(err.to_string(), "invalid query range [3:1] for 4 leaves");
    }
}
