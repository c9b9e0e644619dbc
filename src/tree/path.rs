//! Persistent highlight path
//!
//! Each recursion level extends its parent's path by one id. Links are
//! shared, so extending is O(1) and never disturbs the caller's path.

use std::rc::Rc;

#[derive(Debug)]
struct PathLink {
    id: usize,
    depth: usize,
    prev: Option<Rc<PathLink>>,
}

/// Immutable root-to-node id path
#[derive(Debug, Clone, Default)]
pub struct HighlightPath {
    tail: Option<Rc<PathLink>>,
}

impl HighlightPath {
    /// Empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Path with `id` appended; `self` is left untouched
    pub fn extend(&self, id: usize) -> Self {
        let depth = self.len() + 1;
        Self {
            tail: Some(Rc::new(PathLink {
                id,
                depth,
                prev: self.tail.clone(),
            })),
        }
    }

    /// Number of ids on the path
    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |link| link.depth)
    }

    /// Whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// Last id on the path
    pub fn last(&self) -> Option<usize> {
        self.tail.as_ref().map(|link| link.id)
    }

    /// Materialize root-first
    pub fn to_vec(&self) -> Vec<usize> {
        let mut ids = Vec::with_capacity(self.len());
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            ids.push(link.id);
            cursor = link.prev.as_deref();
        }
        ids.reverse();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_is_persistent() {
        let root = HighlightPath::new().extend(0);
        let left = root.extend(1);
        let right = root.extend(2);

        assert_eq!(root.to_vec(), vec![0]);
        assert_eq!(left.to_vec(), vec![0, 1]);
        assert_eq!(right.to_vec(), vec![0, 2]);
        assert_eq!(right.extend(6).to_vec(), vec![0, 2, 6]);
        assert_eq!(right.len(), 2);
        assert_eq!(right.last(), Some(2));
    }

    #[test]
    fn test_empty_path() {
        let path = HighlightPath::new();
        assert!(path.is_empty());
        assert!(path.to_vec().is_empty());
        assert_eq!(path.last(), None);
    }
}
