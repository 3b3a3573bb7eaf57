//! Balanced construction from a sorted sequence.
//!
//! The element at the median of a sorted range becomes the root of the
//! subtree for that range; the elements before it form the left subtree and
//! the elements after it form the right subtree. For a range of `n`
//! elements the left subtree gets `n / 2` of them and the right subtree gets
//! `n - n / 2 - 1`, so the height never exceeds `ceil(log2(n + 1))`.
//!
//! Node counts are returned from each call and summed by the caller. There
//! is no shared counter, which is what lets the two halves be built
//! independently (see `par_build_balanced` with the `rayon` feature).

use super::node::{Link, TreeNode};

/// Depth assigned to the root of a tree.
pub(crate) const ROOT_DEPTH: usize = 1;

/// Builds a balanced tree from elements already sorted by key.
///
/// Returns the root of the new tree together with the number of nodes
/// created. An in-order traversal of the result yields `sorted` in its
/// original order. An empty input yields no root and a count of zero.
///
/// The input is consumed front to back exactly once, so construction is
/// O(n) with no intermediate copies.
///
/// # Examples
///
/// ```rust
/// use balanced_bst::tree::build_balanced;
///
/// let (root, count) = build_balanced(vec![(1, 'a'), (3, 'c'), (4, 'd'), (5, 'e'), (8, 'h')]);
/// let root = root.unwrap();
///
/// assert_eq!(count, 5);
/// assert_eq!((root.key(), root.depth()), (&4, 1));
/// assert_eq!(root.left().map(|node| *node.key()), Some(3));
/// assert_eq!(root.right().map(|node| *node.key()), Some(8));
///
/// let (empty, count) = build_balanced(Vec::<(i32, char)>::new());
/// assert!(empty.is_none());
/// assert_eq!(count, 0);
/// ```
#[must_use]
pub fn build_balanced<K, V>(sorted: Vec<(K, V)>) -> (Option<Box<TreeNode<K, V>>>, usize) {
    let length = sorted.len();
    build_range(&mut sorted.into_iter(), length, ROOT_DEPTH)
}

/// Builds the subtree for the next `size` elements of `elements`.
///
/// The left subtree takes the first `size / 2` elements, the next element
/// becomes this node, and the right subtree takes the remainder. This
/// visits the elements in the same order an in-order traversal of the
/// finished tree does.
fn build_range<K, V, I>(elements: &mut I, size: usize, depth: usize) -> (Link<K, V>, usize)
where
    I: Iterator<Item = (K, V)>,
{
    if size == 0 {
        return (None, 0);
    }

    let mid = size / 2;
    let (left, left_count) = build_range(elements, mid, depth + 1);

    let Some((key, item)) = elements.next() else {
        return (left, left_count);
    };

    let (right, right_count) = build_range(elements, size - mid - 1, depth + 1);

    let mut node = TreeNode::new(key, item, depth);
    node.left = left;
    node.right = right;
    (Some(Box::new(node)), left_count + 1 + right_count)
}

/// Builds a balanced tree from sorted elements, building the two halves of
/// large ranges on the rayon thread pool.
///
/// Produces exactly the same tree as [`build_balanced`].
///
/// # Examples
///
/// ```rust
/// use balanced_bst::tree::{build_balanced, par_build_balanced};
///
/// let sorted: Vec<(u32, u32)> = (0..50_000).map(|key| (key, key * 2)).collect();
/// let (parallel, count) = par_build_balanced(sorted.clone());
/// let (sequential, _) = build_balanced(sorted);
///
/// assert_eq!(count, 50_000);
/// assert_eq!(parallel, sequential);
/// ```
#[cfg(feature = "rayon")]
#[must_use]
pub fn par_build_balanced<K, V>(sorted: Vec<(K, V)>) -> (Option<Box<TreeNode<K, V>>>, usize)
where
    K: Send,
    V: Send,
{
    par_build_range(sorted, ROOT_DEPTH)
}

#[cfg(feature = "rayon")]
fn par_build_range<K, V>(mut elements: Vec<(K, V)>, depth: usize) -> (Link<K, V>, usize)
where
    K: Send,
    V: Send,
{
    let size = elements.len();
    if size <= crate::PARALLEL_THRESHOLD {
        return build_range(&mut elements.into_iter(), size, depth);
    }

    let mid = size / 2;
    let right_elements = elements.split_off(mid + 1);
    let Some((key, item)) = elements.pop() else {
        return (None, 0);
    };

    let ((left, left_count), (right, right_count)) = rayon::join(
        || par_build_range(elements, depth + 1),
        || par_build_range(right_elements, depth + 1),
    );

    let mut node = TreeNode::new(key, item, depth);
    node.left = left;
    node.right = right;
    (Some(Box::new(node)), left_count + 1 + right_count)
}
