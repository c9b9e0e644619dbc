//! Query engine
//!
//! Decomposes [qs, qe] into canonical segments. A node fully inside the
//! query returns its stored aggregate without descending, so only
//! O(log n) nodes are touched.

use tracing::{debug, debug_span, trace, warn};

use super::SegmentTree;
use crate::{
    algebra::Combiner,
    signed,
    trace::{Operand, QueryOutcome, QueryStep, QueryTrace, Trace},
    tree::{left_child, right_child, HighlightPath, NodeRange},
    visited::VisitedSet,
    TreeError,
};

/// Aggregate over the query range plus the trace that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<V> {
    /// Combined value over [qs, qe]
    pub value: V,
    /// Step-by-step decomposition
    pub trace: QueryTrace<V>,
}

/// Per-query recursion state
struct QueryState<V> {
    qs: usize,
    qe: usize,
    visited: VisitedSet,
    steps: QueryTrace<V>,
}

impl<C: Combiner> SegmentTree<C> {
    /// Aggregate over the inclusive range `[qs, qe]`
    ///
    /// Rejected with [`TreeError::Range`] before any recursion when
    /// `qs > qe` or `qe >= len`.
    pub fn query(&self, qs: usize, qe: usize) -> Result<QueryResult<C::Value>, TreeError> {
        let root = self.validate_range(qs, qe)?;

        let span = debug_span!("query", op = self.combiner.name(), qs, qe);
        let _enter = span.enter();

        let mut state = QueryState {
            qs,
            qe,
            visited: VisitedSet::with_capacity(self.storage.capacity()),
            steps: Trace::new(),
        };
        let value = self.query_node(0, root, &HighlightPath::new(), &mut state);

        debug!(%value, steps = state.steps.len(), visited = state.visited.len(), "query complete");
        Ok(QueryResult {
            value,
            trace: state.steps,
        })
    }

    /// Stored value of leaf `index`
    pub fn value_at(&self, index: usize) -> Result<C::Value, TreeError> {
        self.query(index, index).map(|result| result.value)
    }

    fn validate_range(&self, qs: usize, qe: usize) -> Result<NodeRange, TreeError> {
        match NodeRange::root(self.len) {
            Some(root) if qs <= qe && qe < self.len => Ok(root),
            _ => {
                warn!(qs, qe, len = self.len, "query range rejected");
                Err(TreeError::Range {
                    start: signed(qs),
                    end: signed(qe),
                    len: self.len,
                })
            }
        }
    }

    fn query_node(
        &self,
        si: usize,
        range: NodeRange,
        parent_path: &HighlightPath,
        state: &mut QueryState<C::Value>,
    ) -> C::Value {
        let path = parent_path.extend(si);
        let intersects = range.intersects(state.qs, state.qe);
        let highlight = if intersects { path.to_vec() } else { Vec::new() };
        // Visiting is bookkeeping; a disjoint node is still visited
        state.visited.insert(si);

        if !intersects {
            Self::record(state, si, range, false, highlight, QueryOutcome::Disjoint);
            return self.combiner.identity();
        }

        if range.is_within(state.qs, state.qe) {
            let value = self
                .storage
                .get(si)
                .unwrap_or_else(|| self.combiner.identity());
            Self::record(state, si, range, true, highlight, QueryOutcome::Covered { value });
            return value;
        }

        Self::record(state, si, range, true, highlight, QueryOutcome::Split);

        let (left_range, right_range) = range.split();
        let (left_id, right_id) = (left_child(si), right_child(si));
        let left = self.query_node(left_id, left_range, &path, state);
        let right = self.query_node(right_id, right_range, &path, state);
        let value = self.combiner.combine(left, right);

        Self::record(
            state,
            si,
            range,
            true,
            path.to_vec(),
            QueryOutcome::Combined {
                left: Operand {
                    node: left_id,
                    range: left_range,
                    value: left,
                },
                right: Operand {
                    node: right_id,
                    range: right_range,
                    value: right,
                },
                expression: self.combiner.render(left, right),
                value,
            },
        );
        value
    }

    fn record(
        state: &mut QueryState<C::Value>,
        node: usize,
        range: NodeRange,
        intersects: bool,
        highlight: Vec<usize>,
        outcome: QueryOutcome<C::Value>,
    ) {
        trace!(node, %range, ?outcome, "query step");
        state.steps.push(QueryStep {
            node,
            range,
            intersects,
            visited: state.visited.clone(),
            highlight,
            outcome,
        });
    }
}
