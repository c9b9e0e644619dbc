//! Flat array layout
//!
//! Node `si` covering [ss, se] has children at `2*si+1` ([ss, mid]) and
//! `2*si+2` ([mid+1, se]). With capacity ≥ 4n every id addressed by a valid
//! sub-range stays in bounds.

/// Minimum slots per leaf
pub const MIN_CAPACITY_FACTOR: usize = 4;

/// Maximum slots per leaf
pub const MAX_CAPACITY_FACTOR: usize = 64;

/// Left child id
#[inline]
pub fn left_child(id: usize) -> usize {
    2 * id + 1
}

/// Right child id
#[inline]
pub fn right_child(id: usize) -> usize {
    2 * id + 2
}

/// Parent id, `None` for the root
#[inline]
pub fn parent(id: usize) -> Option<usize> {
    id.checked_sub(1).map(|i| i / 2)
}

/// Tree array: one optional aggregate per slot
///
/// `None` marks a slot that was never written. Ids are stable for the
/// lifetime of one build.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage<V> {
    slots: Vec<Option<V>>,
}

impl<V: Copy> Storage<V> {
    /// Allocate `capacity` undefined slots
    ///
    /// Size it with [`TreeConfig::capacity_for`](crate::TreeConfig::capacity_for).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Aggregate stored at `id`
    #[inline]
    pub fn get(&self, id: usize) -> Option<V> {
        self.slots.get(id).copied().flatten()
    }

    /// Overwrite slot `id`
    ///
    /// Panics if `id` is outside the allocation: the layout guarantees it
    /// cannot be for validated input.
    #[inline]
    pub fn set(&mut self, id: usize, value: V) {
        self.slots[id] = Some(value);
    }

    /// Allocated slot count
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raw slots
    pub fn as_slice(&self) -> &[Option<V>] {
        &self.slots
    }
}

impl<V> Default for Storage<V> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}
