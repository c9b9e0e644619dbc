//! Visited-node bookkeeping
//!
//! One bit per node id, insert-only for the duration of a query or update.
//! Every trace step owns a clone, so the sets along a trace only grow.

use bitvec::prelude::*;

/// Set of node ids touched so far
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
#[cfg_attr(feature = "visualize", serde(into = "Vec<usize>"))]
pub struct VisitedSet {
    bits: BitVec,
}

impl VisitedSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set pre-sized for ids below `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Mark `id` visited; returns whether it was new
    pub fn insert(&mut self, id: usize) -> bool {
        if id >= self.bits.len() {
            self.bits.resize(id + 1, false);
        }
        let fresh = !self.bits[id];
        self.bits.set(id, true);
        fresh
    }

    /// Whether `id` has been visited
    pub fn contains(&self, id: usize) -> bool {
        self.bits.get(id).is_some_and(|bit| *bit)
    }

    /// Visited ids, ascending
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Number of visited ids
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether nothing was visited
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Whether every id in `other` is also in `self`
    pub fn is_superset(&self, other: &VisitedSet) -> bool {
        other.iter().all(|id| self.contains(id))
    }

    /// Visited ids as a vector, ascending
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl PartialEq for VisitedSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for VisitedSet {}

impl From<VisitedSet> for Vec<usize> {
    fn from(set: VisitedSet) -> Self {
        set.to_vec()
    }
}

impl FromIterator<usize> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = VisitedSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_grows_on_demand() {
        let mut set = VisitedSet::new();
        assert!(set.insert(9));
        assert!(set.insert(0));
        assert!(!set.insert(9));

        assert_eq!(set.to_vec(), vec![0, 9]);
        assert_eq!(set.len(), 2);
        assert!(!set.contains(5));
        assert!(!set.contains(1000));
    }

    #[test]
    fn test_contains_reads_set_bits_only() {
        let mut set = VisitedSet::with_capacity(8);
        set.insert(2);
        assert!(set.contains(2));
        assert!(!set.contains(3));
        assert!(!set.contains(8));
        assert!(!VisitedSet::new().contains(0));
    }

    #[test]
    fn test_equality_ignores_capacity() {
        let mut a = VisitedSet::with_capacity(64);
        a.insert(3);
        let b: VisitedSet = [3].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_superset() {
        let small: VisitedSet = [0, 1].into_iter().collect();
        let large: VisitedSet = [0, 1, 2].into_iter().collect();
        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
        assert!(small.is_superset(&VisitedSet::new()));
    }
}
