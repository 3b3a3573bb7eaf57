//! Stable merge sort.
//!
//! This module provides the sorting stage of bulk construction:
//!
//! - [`merge_sort`]: sorts elements by their natural order
//! - [`merge_sort_by`]: sorts elements with a comparison function
//! - [`merge_sort_by_key`]: sorts elements by an extracted key
//! - [`merge_sort_by_cached_key`]: sorts elements by a key extracted once
//!   per element
//!
//! All functions are stable: elements that compare equal keep their
//! relative input order. This keeps the shape of a tree built from the
//! output reproducible even when keys repeat.
//!
//! # Internal Structure
//!
//! The sort is a classic top-down merge sort, but it runs over a
//! permutation of indices rather than over the elements themselves. A single
//! auxiliary index buffer is shared by every merge, so the extra space is
//! O(n) regardless of recursion depth, and elements are moved exactly once
//! into their final position. Element types therefore need neither `Clone`
//! nor `Copy`.
//!
//! # Time Complexity
//!
//! | Case    | Complexity  |
//! |---------|-------------|
//! | Best    | O(n log n)  |
//! | Worst   | O(n log n)  |
//! | Space   | O(n)        |
//!
//! # Examples
//!
//! ```rust
//! use balanced_bst::sort::merge_sort_by_key;
//!
//! let pairs = vec![(3, "c"), (1, "a"), (3, "b"), (2, "x")];
//! let sorted = merge_sort_by_key(pairs, |pair| pair.0);
//!
//! // Equal keys keep their input order
//! assert_eq!(sorted, vec![(1, "a"), (2, "x"), (3, "c"), (3, "b")]);
//! ```

use std::cmp::Ordering;

/// Sorts elements in ascending order.
///
/// # Examples
///
/// ```rust
/// use balanced_bst::sort::merge_sort;
///
/// assert_eq!(merge_sort(vec![5, 3, 8, 1, 4]), vec![1, 3, 4, 5, 8]);
/// assert!(merge_sort(Vec::<i32>::new()).is_empty());
/// ```
#[must_use]
pub fn merge_sort<T: Ord>(elements: Vec<T>) -> Vec<T> {
    merge_sort_by(elements, T::cmp)
}

/// Sorts elements with a comparison function.
///
/// The sort is stable: when `compare` returns [`Ordering::Equal`], the
/// element that came first in the input comes first in the output.
///
/// # Arguments
///
/// * `elements` - The elements to sort
/// * `compare` - Total order over the elements
///
/// # Examples
///
/// ```rust
/// use balanced_bst::sort::merge_sort_by;
///
/// let sorted = merge_sort_by(vec![1, 4, 2, 3], |left, right| right.cmp(left));
/// assert_eq!(sorted, vec![4, 3, 2, 1]);
/// ```
#[must_use]
pub fn merge_sort_by<T, F>(elements: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if elements.len() <= 1 {
        return elements;
    }

    let mut order: Vec<usize> = (0..elements.len()).collect();
    let mut scratch = vec![0; elements.len()];
    sort_indices(&elements, &mut order, &mut scratch, &mut compare);
    apply_permutation(elements, &order)
}

/// Sorts elements by a key extracted from each element.
///
/// `key` is called twice per comparison, so it should be a cheap
/// projection such as a field read. For keys that allocate or clone, use
/// [`merge_sort_by_cached_key`].
///
/// # Examples
///
/// ```rust
/// use balanced_bst::sort::merge_sort_by_key;
///
/// let words = vec!["banana", "fig", "apple", "kiwi"];
/// let sorted = merge_sort_by_key(words, |word| word.len());
/// assert_eq!(sorted, vec!["fig", "kiwi", "apple", "banana"]);
/// ```
#[must_use]
pub fn merge_sort_by_key<T, K, F>(elements: Vec<T>, mut key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    merge_sort_by(elements, |left, right| key(left).cmp(&key(right)))
}

/// Sorts elements by a key that is extracted exactly once per element.
///
/// The keys are stored in a side buffer and the index permutation is sorted
/// against it, so this costs O(n) extra space for the keys but only n calls
/// to `key`. The sort is stable.
///
/// # Examples
///
/// ```rust
/// use balanced_bst::sort::merge_sort_by_cached_key;
///
/// let names = vec!["Carol", "alice", "Bob", "ALICE"];
/// let sorted = merge_sort_by_cached_key(names, |name| name.to_lowercase());
/// assert_eq!(sorted, vec!["alice", "ALICE", "Bob", "Carol"]);
/// ```
#[must_use]
pub fn merge_sort_by_cached_key<T, K, F>(elements: Vec<T>, key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    if elements.len() <= 1 {
        return elements;
    }

    let keys: Vec<K> = elements.iter().map(key).collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    let mut scratch = vec![0; keys.len()];
    sort_indices(&keys, &mut order, &mut scratch, &mut K::cmp);
    apply_permutation(elements, &order)
}

/// Sorts elements with a comparison function, splitting work across the
/// rayon thread pool.
///
/// Produces exactly the same output as [`merge_sort_by`].
///
/// # Examples
///
/// ```rust
/// use balanced_bst::sort::par_merge_sort_by;
///
/// let elements: Vec<i32> = (0..10_000).rev().collect();
/// let sorted = par_merge_sort_by(elements, i32::cmp);
/// assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
/// ```
#[cfg(feature = "rayon")]
#[must_use]
pub fn par_merge_sort_by<T, F>(elements: Vec<T>, compare: F) -> Vec<T>
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if elements.len() <= 1 {
        return elements;
    }

    let mut order: Vec<usize> = (0..elements.len()).collect();
    let mut scratch = vec![0; elements.len()];
    par_sort_indices(&elements, &mut order, &mut scratch, &compare);
    apply_permutation(elements, &order)
}

// =============================================================================
// Index Merge Sort
// =============================================================================

/// Sorts `order` (indices into `elements`). `scratch` has the same length.
fn sort_indices<T, F>(elements: &[T], order: &mut [usize], scratch: &mut [usize], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let length = order.len();
    if length <= 1 {
        return;
    }

    let mid = length / 2;
    {
        let (left_order, right_order) = order.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        sort_indices(elements, left_order, left_scratch, compare);
        sort_indices(elements, right_order, right_scratch, compare);
    }
    merge_runs(elements, order, mid, scratch, compare);
}

#[cfg(feature = "rayon")]
fn par_sort_indices<T, F>(elements: &[T], order: &mut [usize], scratch: &mut [usize], compare: &F)
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let length = order.len();
    let mut sequential = compare;
    if length <= crate::PARALLEL_THRESHOLD {
        sort_indices(elements, order, scratch, &mut sequential);
        return;
    }

    let mid = length / 2;
    {
        let (left_order, right_order) = order.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        rayon::join(
            || par_sort_indices(elements, left_order, left_scratch, compare),
            || par_sort_indices(elements, right_order, right_scratch, compare),
        );
    }
    merge_runs(elements, order, mid, scratch, &mut sequential);
}

/// Merges the sorted runs `order[..mid]` and `order[mid..]` in place.
///
/// Ties take from the left run, which is what makes the sort stable.
fn merge_runs<T, F>(
    elements: &[T],
    order: &mut [usize],
    mid: usize,
    scratch: &mut [usize],
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    scratch.copy_from_slice(order);
    let (left_run, right_run) = scratch.split_at(mid);
    let mut left_index = 0;
    let mut right_index = 0;

    for slot in order.iter_mut() {
        let take_left = match (left_run.get(left_index), right_run.get(right_index)) {
            (Some(&left), Some(&right)) => {
                compare(&elements[left], &elements[right]) != Ordering::Greater
            }
            (Some(_), None) => true,
            (None, _) => false,
        };

        if take_left {
            *slot = left_run[left_index];
            left_index += 1;
        } else {
            *slot = right_run[right_index];
            right_index += 1;
        }
    }
}

/// Moves each element to the position given by `order`.
fn apply_permutation<T>(elements: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = elements.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
