//! Associative combine operators
//!
//! combine(a, combine(b, c)) = combine(combine(a, b), c)
//! combine(x, e) = combine(e, x) = x

use std::fmt;

/// Associative binary operator with a two-sided identity
///
/// Parameterizes the whole engine. The operator is fixed for the lifetime of
/// a tree; switching operators requires a fresh build.
pub trait Combiner: fmt::Debug {
    /// Value domain aggregated by the operator.
    type Value: Copy + PartialEq + fmt::Debug + fmt::Display;

    /// Short operator name (`sum`, `min`, ...).
    fn name(&self) -> &'static str;

    /// Identity element `e`.
    fn identity(&self) -> Self::Value;

    /// Combine two aggregates (must be associative).
    fn combine(&self, left: Self::Value, right: Self::Value) -> Self::Value;

    /// Combine two possibly-undefined aggregates.
    ///
    /// An absent operand behaves as the identity, so it never wins.
    fn combine_defined(
        &self,
        left: Option<Self::Value>,
        right: Option<Self::Value>,
    ) -> Self::Value {
        match (left, right) {
            (Some(l), Some(r)) => self.combine(l, r),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => self.identity(),
        }
    }

    /// Human-readable combination expression, e.g. `3 + 8` or `min(3, 8)`.
    fn render(&self, left: Self::Value, right: Self::Value) -> String {
        format!("{}({}, {})", self.name(), left, right)
    }
}

/// Range sum over `i64`
///
/// Aggregates are computed modulo 2^64: a total outside the `i64` range
/// wraps instead of panicking, so `[i64::MAX, 1]` sums to `i64::MIN`.
/// Wrapping keeps `combine` total and associative. Use [`WideSum`] when
/// totals may leave the `i64` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sum;

impl Combiner for Sum {
    type Value = i64;

    fn name(&self) -> &'static str {
        "sum"
    }

    fn identity(&self) -> i64 {
        0
    }

    #[inline]
    fn combine(&self, left: i64, right: i64) -> i64 {
        left.wrapping_add(right)
    }

    fn render(&self, left: i64, right: i64) -> String {
        format!("{} + {}", left, right)
    }
}

/// Range sum over `i128`
///
/// Sums of up to 2^64 `i64` leaves fit without wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WideSum;

impl Combiner for WideSum {
    type Value = i128;

    fn name(&self) -> &'static str {
        "sum"
    }

    fn identity(&self) -> i128 {
        0
    }

    #[inline]
    fn combine(&self, left: i128, right: i128) -> i128 {
        left.wrapping_add(right)
    }

    fn render(&self, left: i128, right: i128) -> String {
        format!("{} + {}", left, right)
    }
}

/// Range minimum over `i64` (identity `i64::MAX` stands in for +∞)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Min;

impl Combiner for Min {
    type Value = i64;

    fn name(&self) -> &'static str {
        "min"
    }

    fn identity(&self) -> i64 {
        i64::MAX
    }

    #[inline]
    fn combine(&self, left: i64, right: i64) -> i64 {
        left.min(right)
    }
}

/// Range maximum over `i64` (identity `i64::MIN`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Max;

impl Combiner for Max {
    type Value = i64;

    fn name(&self) -> &'static str {
        "max"
    }

    fn identity(&self) -> i64 {
        i64::MIN
    }

    #[inline]
    fn combine(&self, left: i64, right: i64) -> i64 {
        left.max(right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_two_sided() {
        for x in [-7, 0, 3, i64::MAX, i64::MIN] {
            assert_eq!(Sum.combine(x, Sum.identity()), x);
            assert_eq!(Sum.combine(Sum.identity(), x), x);
            assert_eq!(Min.combine(x, Min.identity()), x);
            assert_eq!(Min.combine(Min.identity(), x), x);
            assert_eq!(Max.combine(x, Max.identity()), x);
            assert_eq!(Max.combine(Max.identity(), x), x);
        }
    }

    #[test]
    fn test_undefined_operand_never_wins() {
        assert_eq!(Sum.combine_defined(Some(4), None), 4);
        assert_eq!(Sum.combine_defined(None, None), 0);
        // An absent value must not beat a real one under min
        assert_eq!(Min.combine_defined(None, Some(9)), 9);
        assert_eq!(Min.combine_defined(Some(2), Some(9)), 2);
    }

    #[test]
    fn test_wrapping_sum_stays_associative() {
        let (a, b, c) = (i64::MAX, 1, -5);
        assert_eq!(
            Sum.combine(a, Sum.combine(b, c)),
            Sum.combine(Sum.combine(a, b), c)
        );
    }

    #[test]
    fn test_sum_overflow_wraps() {
        assert_eq!(Sum.combine(i64::MAX, 1), i64::MIN);
        assert_eq!(Sum.combine(i64::MIN, -1), i64::MAX);

        let wide = WideSum.combine(i64::MAX.into(), 1);
        assert_eq!(wide, i128::from(i64::MAX) + 1);
    }

    #[test]
    fn test_render_expression() {
        assert_eq!(Sum.render(3, 8), "3 + 8");
        assert_eq!(Min.render(3, 8), "min(3, 8)");
    }
}
