//! Algebraic and trace properties over random inputs

mod common;

use common::{brute_force, built, ordered};
use proptest::prelude::*;
use segtrace::{Min, Sum};

fn leaf_values() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-1_000i64..1_000, 1..48)
}

proptest! {
    #[test]
    fn full_range_equals_fold(values in leaf_values()) {
        let n = values.len();
        let sum = built(Sum, &values);
        let min = built(Min, &values);

        prop_assert_eq!(sum.query(0, n - 1).unwrap().value, values.iter().sum::<i64>());
        prop_assert_eq!(min.query(0, n - 1).unwrap().value, *values.iter().min().unwrap());
    }

    #[test]
    fn query_matches_brute_force(values in leaf_values(), a in 0usize..48, b in 0usize..48) {
        let n = values.len();
        let (qs, qe) = ordered(a % n, b % n);

        let sum = built(Sum, &values);
        let min = built(Min, &values);
        prop_assert_eq!(sum.query(qs, qe).unwrap().value, brute_force(&Sum, &values, qs, qe));
        prop_assert_eq!(min.query(qs, qe).unwrap().value, brute_force(&Min, &values, qs, qe));
    }

    #[test]
    fn update_then_query(values in leaf_values(), i in 0usize..48, v in -1_000i64..1_000) {
        let n = values.len();
        let i = i % n;
        let mut tree = built(Sum, &values);
        tree.update(i, v).unwrap();

        let mut expected = values.clone();
        expected[i] = v;
        prop_assert_eq!(tree.query(i, i).unwrap().value, v);
        for qs in 0..n {
            let qe = n - 1;
            prop_assert_eq!(tree.query(qs, qe).unwrap().value, brute_force(&Sum, &expected, qs, qe));
        }
    }

    #[test]
    fn update_is_idempotent(values in leaf_values(), i in 0usize..48, v in -1_000i64..1_000) {
        let i = i % values.len();
        let mut once = built(Min, &values);
        once.update(i, v).unwrap();
        let mut twice = built(Min, &values);
        twice.update(i, v).unwrap();
        twice.update(i, v).unwrap();

        prop_assert_eq!(once.tree_array(), twice.tree_array());
    }

    #[test]
    fn visited_sets_only_grow(values in leaf_values(), a in 0usize..48, b in 0usize..48) {
        let n = values.len();
        let (qs, qe) = ordered(a % n, b % n);
        let mut tree = built(Sum, &values);

        let query = tree.query(qs, qe).unwrap();
        for pair in query.trace.steps().windows(2) {
            prop_assert!(pair[1].visited.is_superset(&pair[0].visited));
        }

        let update = tree.update(qs, 7).unwrap();
        for pair in update.steps().windows(2) {
            prop_assert!(pair[1].visited.is_superset(&pair[0].visited));
        }
    }

    #[test]
    fn build_emits_every_node_once(values in leaf_values()) {
        let mut tree = segtrace::SegmentTree::new(Sum);
        let trace = tree.build(&segtrace::input::leaves_from_values(&values));
        let n = values.len();

        // 2n - 1 nodes: leaves emit enter + leaf, internal nodes enter + split + combine
        prop_assert_eq!(tree.nodes().len(), 2 * n - 1);
        prop_assert_eq!(trace.len(), 2 * n + 3 * (n - 1));
        prop_assert!(tree.nodes().iter().all(|node| node.value.is_some()));
    }
}
