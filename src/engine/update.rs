//! Update engine
//!
//! Point assignment at one leaf, then each ancestor is recomputed from its
//! two children on the way back up. An ancestor is only rewritten after both
//! of its children are final, so the array never holds a half-applied value
//! for any fully unwound subtree.

use tracing::{debug, debug_span, trace, warn};

use super::SegmentTree;
use crate::{
    algebra::Combiner,
    signed,
    trace::{Trace, UpdateStep, UpdateTrace},
    tree::{left_child, right_child, HighlightPath, NodeRange, Storage},
    visited::VisitedSet,
    TreeError,
};

impl<C: Combiner> SegmentTree<C> {
    /// Set leaf `index` to `value` and refresh every ancestor
    ///
    /// Rejected with [`TreeError::Index`] before any recursion when
    /// `index >= len`. Only the tree array is mutated.
    pub fn update(&mut self, index: usize, value: C::Value) -> Result<UpdateTrace, TreeError> {
        let root = match NodeRange::root(self.len) {
            Some(root) if index < self.len => root,
            _ => {
                warn!(index, len = self.len, "update index rejected");
                return Err(TreeError::Index {
                    index: signed(index),
                    len: self.len,
                });
            }
        };

        let span = debug_span!("update", op = self.combiner.name(), index, %value);
        let _enter = span.enter();

        let mut updater = Updater {
            combiner: &self.combiner,
            storage: &mut self.storage,
            index,
            value,
            visited: VisitedSet::new(),
            steps: Trace::new(),
        };
        updater.update_node(0, root, &HighlightPath::new());
        let steps = updater.steps;

        debug!(steps = steps.len(), root = ?self.storage.get(0), "update complete");
        Ok(steps)
    }
}

/// Borrowed state threaded through one update
struct Updater<'a, C: Combiner> {
    combiner: &'a C,
    storage: &'a mut Storage<C::Value>,
    index: usize,
    value: C::Value,
    visited: VisitedSet,
    steps: UpdateTrace,
}

impl<C: Combiner> Updater<'_, C> {
    fn update_node(&mut self, si: usize, range: NodeRange, parent_path: &HighlightPath) {
        let path = parent_path.extend(si);
        let covers = range.contains(self.index);
        self.visited.insert(si);

        trace!(node = si, %range, covers, "update step");
        self.steps.push(UpdateStep {
            node: si,
            range,
            covers,
            visited: self.visited.clone(),
            highlight: if covers { path.to_vec() } else { Vec::new() },
        });

        if !covers {
            return;
        }

        if range.is_leaf() {
            self.storage.set(si, self.value);
            return;
        }

        // Both children are entered; the one not covering `index` returns at once
        let (left_range, right_range) = range.split();
        let (left_id, right_id) = (left_child(si), right_child(si));
        self.update_node(left_id, left_range, &path);
        self.update_node(right_id, right_range, &path);

        let combined = self
            .combiner
            .combine_defined(self.storage.get(left_id), self.storage.get(right_id));
        self.storage.set(si, combined);
    }
}
