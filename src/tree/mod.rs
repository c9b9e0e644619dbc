//! Array-backed tree shape
//!
//! Node = inclusive range [start, end] at a stable array id.
//! Midpoint recursion keeps the height at ⌈log2 n⌉.

mod layout;
mod node;
mod path;

pub use layout::{
    left_child, parent, right_child, Storage, MAX_CAPACITY_FACTOR, MIN_CAPACITY_FACTOR,
};
pub use node::{Node, NodeRange, NodeStatus};
pub use path::HighlightPath;

/// Height bound for `n` leaves: ⌈log2 n⌉
pub fn height_bound(len: usize) -> usize {
    if len <= 1 {
        0
    } else {
        (usize::BITS - (len - 1).leading_zeros()) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(range: NodeRange) -> usize {
        if range.is_leaf() {
            return 0;
        }
        let (left, right) = range.split();
        1 + depth(left).max(depth(right))
    }

    #[test]
    fn test_height_logarithmic() {
        for n in [1, 2, 3, 5, 10, 100, 1000, 1024, 1025] {
            let root = NodeRange::root(n).unwrap();
            assert_eq!(depth(root), height_bound(n), "n = {n}");
        }
    }
}
