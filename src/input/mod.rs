//! Leaf sequences
//!
//! Order is load-bearing: leaf `i` is index `i` in every range. Keys and
//! group tags never reach the engine; groups only translate a name into the
//! index range a query should use.

use std::str::FromStr;

use crate::{tree::NodeRange, TreeError};

/// One ordered input element
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Leaf<V> {
    /// Identifier shown to the user
    pub key: String,
    /// Value aggregated by the tree
    pub value: V,
    /// Optional grouping tag (e.g. a province)
    pub group: Option<String>,
}

impl<V> Leaf<V> {
    /// Ungrouped leaf
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            group: None,
        }
    }

    /// Leaf tagged with `group`
    pub fn grouped(key: impl Into<String>, value: V, group: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            group: Some(group.into()),
        }
    }
}

/// Parses `value`, `key=value` or `key=value@group`
///
/// A bare value gets an empty key.
impl FromStr for Leaf<i64> {
    type Err = TreeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (key, rest) = match text.split_once('=') {
            Some((key, rest)) => (key.trim(), rest),
            None => ("", text),
        };
        let (value, group) = match rest.split_once('@') {
            Some((value, group)) => (value.trim(), Some(group.trim())),
            None => (rest.trim(), None),
        };

        if text.contains('=') && key.is_empty() {
            return Err(TreeError::Input(format!("missing key in '{text}'")));
        }
        if matches!(group, Some("")) {
            return Err(TreeError::Input(format!("empty group in '{text}'")));
        }
        let value = value
            .parse::<i64>()
            .map_err(|err| TreeError::Input(format!("invalid value in '{text}': {err}")))?;

        Ok(Leaf {
            key: key.to_string(),
            value,
            group: group.map(str::to_string),
        })
    }
}

/// Leaves keyed by position (`"0"`, `"1"`, ...)
pub fn leaves_from_values<V: Copy>(values: &[V]) -> Vec<Leaf<V>> {
    values
        .iter()
        .enumerate()
        .map(|(idx, &value)| Leaf::new(idx.to_string(), value))
        .collect()
}

/// Index range occupied by `group`
///
/// The group's leaves must be contiguous; otherwise no single range query
/// answers for it.
pub fn group_range<V>(leaves: &[Leaf<V>], group: &str) -> Result<NodeRange, TreeError> {
    let mut members = leaves
        .iter()
        .enumerate()
        .filter(|(_, leaf)| leaf.group.as_deref() == Some(group))
        .map(|(idx, _)| idx);

    let first = members
        .next()
        .ok_or_else(|| TreeError::Input(format!("unknown group '{group}'")))?;
    let mut last = first;
    for idx in members {
        if idx != last + 1 {
            return Err(TreeError::Input(format!(
                "group '{group}' is not contiguous (gap before index {idx})"
            )));
        }
        last = idx;
    }
    Ok(NodeRange::new(first, last))
}

/// Query bounds typed as signed integers (e.g. on a command line)
///
/// Negative bounds are rejected with [`TreeError::Range`]; everything else
/// is left to [`SegmentTree::query`](crate::SegmentTree::query).
pub fn range_from_signed(start: i64, end: i64, len: usize) -> Result<(usize, usize), TreeError> {
    match (usize::try_from(start), usize::try_from(end)) {
        (Ok(qs), Ok(qe)) => Ok((qs, qe)),
        _ => Err(TreeError::Range { start, end, len }),
    }
}

/// Update index typed as a signed integer
///
/// Negative indices are rejected with [`TreeError::Index`].
pub fn index_from_signed(index: i64, len: usize) -> Result<usize, TreeError> {
    usize::try_from(index).map_err(|_| TreeError::Index { index, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let bare: Leaf<i64> = "42".parse().unwrap();
        assert_eq!(bare, Leaf::new("", 42));

        let keyed: Leaf<i64> = "hanoi=8".parse().unwrap();
        assert_eq!(keyed, Leaf::new("hanoi", 8));

        let grouped: Leaf<i64> = "hue = -3 @ central".parse().unwrap();
        assert_eq!(grouped, Leaf::grouped("hue", -3, "central"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "x=", "=5", "x=five", "x=5@", "1.5"] {
            let parsed: Result<Leaf<i64>, _> = text.parse();
            assert!(
                matches!(parsed, Err(TreeError::Input(_))),
                "'{text}' should be rejected"
            );
        }
    }

    #[test]
    fn test_group_range() {
        let leaves = vec![
            Leaf::grouped("a", 1, "north"),
            Leaf::grouped("b", 2, "south"),
            Leaf::grouped("c", 3, "south"),
            Leaf::new("d", 4),
            Leaf::grouped("e", 5, "north"),
        ];
        assert_eq!(group_range(&leaves, "south").unwrap(), NodeRange::new(1, 2));
        assert!(matches!(
            group_range(&leaves, "north"),
            Err(TreeError::Input(_))
        ));
        assert!(group_range(&leaves, "west").is_err());
    }

    #[test]
    fn test_negative_positions_rejected() {
        assert_eq!(range_from_signed(1, 3, 5), Ok((1, 3)));
        let err = range_from_signed(-1, 2, 5).unwrap_err();
        assert_eq!(
            err,
            TreeError::Range {
                start: -1,
                end: 2,
                len: 5
            }
        );
        assert_eq!(err.to_string(), "invalid query range [-1:2] for 5 leaves");
        assert!(range_from_signed(0, -4, 5).is_err());

        assert_eq!(index_from_signed(4, 5), Ok(4));
        assert_eq!(
            index_from_signed(-2, 5),
            Err(TreeError::Index { index: -2, len: 5 })
        );
    }

    #[test]
    fn test_positional_keys() {
        let leaves = leaves_from_values(&[9, 8]);
        assert_eq!(leaves[1], Leaf::new("1", 8));
    }
}
