//! Step traces
//!
//! Every algorithm appends owned snapshots in a fixed order: pre-order for
//! entry events, post-order for resolution events. A consumer can replay,
//! reorder or keep steps after the tree itself is gone.

use std::fmt;

mod steps;

pub use steps::{BuildEvent, BuildStep, Operand, QueryOutcome, QueryStep, UpdateStep};

/// Trace emitted by a build
pub type BuildTrace<V> = Trace<BuildStep<V>>;
/// Trace emitted by a range query
pub type QueryTrace<V> = Trace<QueryStep<V>>;
/// Trace emitted by a point update
pub type UpdateTrace = Trace<UpdateStep>;

/// Ordered sequence of step snapshots
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(transparent))]
pub struct Trace<S> {
    steps: Vec<S>,
}

impl<S> Trace<S> {
    /// Empty trace
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub(crate) fn push(&mut self, step: S) {
        self.steps.push(step);
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step was recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at position `index`
    pub fn get(&self, index: usize) -> Option<&S> {
        self.steps.get(index)
    }

    /// Final step
    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    /// Steps in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    /// Steps as a slice
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// Take ownership of the steps
    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }
}

impl<S: fmt::Display> Trace<S> {
    /// BLAKE3 digest over the rendered steps
    ///
    /// Two runs with the same input and operator produce the same digest.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for step in &self.steps {
            hasher.update(step.to_string().as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize()
    }
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> IntoIterator for Trace<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<S: fmt::Display> fmt::Display for Trace<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>4}  {}", idx + 1, step)?;
        }
        Ok(())
    }
}
