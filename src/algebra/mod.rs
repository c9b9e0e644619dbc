//! Combine operators
//!
//! A tree is parameterized by exactly one [`Combiner`]: an associative
//! binary operation with an identity element. Sum and minimum are the two
//! operators the engine was designed around; maximum is provided as the
//! first extension.

mod combiner;

pub use combiner::{Combiner, Max, Min, Sum, WideSum};

/// Left fold of `values` under `combiner`, starting from the identity
///
/// Brute-force reference for range queries: O(n) per call.
pub fn fold<C: Combiner>(combiner: &C, values: impl IntoIterator<Item = C::Value>) -> C::Value {
    values
        .into_iter()
        .fold(combiner.identity(), |acc, v| combiner.combine(acc, v))
}
