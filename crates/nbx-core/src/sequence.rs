//! Order-preserving sequence helpers used by the consistency checks.

use std::collections::HashSet;
use std::hash::Hash;

/// Drop repeated elements, keeping the first occurrence of each.
pub fn remove_duplicates<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Every element that repeats an earlier one, in the order the repeats occur.
pub fn duplicates<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| !seen.insert(*item))
        .cloned()
        .collect()
}

/// Successive overlapping pairs.
pub fn pairwise<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    items.windows(2).map(|pair| (&pair[0], &pair[1]))
}
