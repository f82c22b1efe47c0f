//! Determinism utilities: stable ordered insertion.
//!
//! Rankings in this workspace are built by inserting items one at a time in
//! input order. `insert_sorted_by` places each item **after** every element
//! that compares equal, so input order is the implicit final tie-break key.

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Binary-search insert `item` into `xs` (already sorted by `cmp`), after
/// any run of equal elements. Returns the insertion index.
pub fn insert_sorted_by<T, F>(xs: &mut Vec<T>, item: T, mut cmp: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let ix = xs.partition_point(|probe| cmp(probe, &item) != Ordering::Greater);
    xs.insert(ix, item);
    ix
}

/// Indices `0..keys.len()` ordered by `key` descending, input order ascending.
pub fn rank_desc_stable<K: Ord>(keys: &[K]) -> Vec<usize> {
    let mut ranking: Vec<usize> = Vec::with_capacity(keys.len());
    for ix in 0..keys.len() {
        insert_sorted_by(&mut ranking, ix, |a, b| keys[*b].cmp(&keys[*a]));
    }
    ranking
}
