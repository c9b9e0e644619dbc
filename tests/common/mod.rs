//! Shared helpers for integration tests

#![allow(dead_code)]

use segtrace::{algebra::fold, input::leaves_from_values, Combiner, SegmentTree};

/// Build a tree over `values` and discard the build trace
pub fn built<C: Combiner<Value = i64>>(combiner: C, values: &[i64]) -> SegmentTree<C> {
    let mut tree = SegmentTree::new(combiner);
    tree.build(&leaves_from_values(values));
    tree
}

/// Brute-force fold over `values[qs..=qe]`
pub fn brute_force<C: Combiner<Value = i64>>(combiner: &C, values: &[i64], qs: usize, qe: usize) -> i64 {
    fold(combiner, values[qs..=qe].iter().copied())
}

/// Order two indices into an inclusive range
pub fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
