//! Skipping equal siblings at a choice point.
//!
//! On sorted input, choosing any member of a run of equal values leads to
//! the same subtree. Only the first index of each run is worth branching on.

use itertools::Itertools;

/// Indices in `values[start..]` where a run of equal values begins.
///
/// ```
/// use backtrack_search::combinatorial::distinct_sibling_starts;
///
/// assert_eq!(distinct_sibling_starts(&[1, 1, 2, 5, 5, 5, 6], 0), vec![0, 2, 3, 6]);
/// assert_eq!(distinct_sibling_starts(&[1, 1, 2, 5, 5, 5, 6], 1), vec![1, 2, 3, 6]);
/// ```
pub fn distinct_sibling_starts<T: PartialEq>(values: &[T], start: usize) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .skip(start)
        .dedup_by(|a, b| a.1 == b.1)
        .map(|(index, _)| index)
        .collect()
}

/// First index after `index` holding a different value, or `values.len()`.
pub fn next_distinct<T: PartialEq>(values: &[T], index: usize) -> usize {
    values[index..]
        .iter()
        .position(|value| *value != values[index])
        .map_or(values.len(), |offset| index + offset)
}
