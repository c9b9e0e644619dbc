//! Construction engine
//!
//! Recursive on [ss, se] from (0, n-1, id 0). Left subtree fully completes,
//! trace included, before the right one starts.

use tracing::{debug, debug_span, trace, warn};

use super::SegmentTree;
use crate::{
    algebra::Combiner,
    input::Leaf,
    trace::{BuildEvent, BuildStep, BuildTrace, Trace},
    tree::{left_child, right_child, HighlightPath, Node, NodeRange, NodeStatus, Storage},
};

impl<C: Combiner> SegmentTree<C> {
    /// Build from `leaves`, replacing any previous state
    ///
    /// An empty sequence yields an empty tree and an empty trace.
    pub fn build(&mut self, leaves: &[Leaf<C::Value>]) -> BuildTrace<C::Value> {
        let span = debug_span!("build", op = self.combiner.name(), leaves = leaves.len());
        let _enter = span.enter();

        let mut storage = Storage::new(self.config.capacity_for(leaves.len()));
        let mut nodes = Vec::new();
        let mut steps = Trace::new();

        if let Some(root) = NodeRange::root(leaves.len()) {
            let mut builder = Builder {
                combiner: &self.combiner,
                leaves,
                storage: &mut storage,
                nodes: &mut nodes,
                steps: &mut steps,
            };
            builder.construct(root, 0, None, &HighlightPath::new().extend(0));
        } else {
            debug!("empty input, nothing to build");
        }

        self.len = leaves.len();
        self.storage = storage;
        self.nodes = nodes;

        debug!(nodes = self.nodes.len(), steps = steps.len(), "build complete");
        steps
    }
}

/// Borrowed state threaded through one construction
struct Builder<'a, C: Combiner> {
    combiner: &'a C,
    leaves: &'a [Leaf<C::Value>],
    storage: &'a mut Storage<C::Value>,
    nodes: &'a mut Vec<Node<C::Value>>,
    steps: &'a mut BuildTrace<C::Value>,
}

impl<C: Combiner> Builder<'_, C> {
    fn snapshot(&mut self, event: BuildEvent, highlight: Vec<usize>) {
        trace!(?event, ?highlight, "build step");
        self.steps.push(BuildStep {
            event,
            nodes: self.nodes.clone(),
            highlight,
        });
    }

    /// Construct node `si` over `range`; returns its aggregate once completed
    fn construct(
        &mut self,
        range: NodeRange,
        si: usize,
        parent: Option<usize>,
        path: &HighlightPath,
    ) -> Option<C::Value> {
        let pos = self.nodes.len();
        self.nodes.push(Node::initial(si, parent, range));
        self.snapshot(BuildEvent::Enter(si), path.to_vec());

        if range.is_leaf() {
            let value = self.leaves[range.start].value;
            self.complete(pos, value);
            self.snapshot(BuildEvent::Leaf(si), Vec::new());
            return Some(value);
        }

        self.nodes[pos].status = NodeStatus::Calculating;
        self.snapshot(BuildEvent::Split(si), path.to_vec());

        let (left_range, right_range) = range.split();
        let (left_id, right_id) = (left_child(si), right_child(si));
        let left = self.construct(left_range, left_id, Some(si), &path.extend(left_id));
        let right = self.construct(right_range, right_id, Some(si), &path.extend(right_id));

        match (left, right) {
            (Some(l), Some(r)) => {
                let value = self.combiner.combine(l, r);
                self.complete(pos, value);

                let mut highlight = path.to_vec();
                highlight.retain(|&id| id != left_id && id != right_id);
                if !highlight.contains(&si) {
                    highlight.push(si);
                }
                self.snapshot(BuildEvent::Combine(si), highlight);
                Some(value)
            }
            _ => {
                warn!(node = si, %range, "child did not complete, node left calculating");
                self.snapshot(BuildEvent::Stalled(si), path.to_vec());
                None
            }
        }
    }

    fn complete(&mut self, pos: usize, value: C::Value) {
        let node = &mut self.nodes[pos];
        node.value = Some(value);
        node.status = NodeStatus::Completed;
        let id = node.id;
        self.storage.set(id, value);
    }
}
