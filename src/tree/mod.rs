//! Balanced binary search tree built from a known collection.
//!
//! This module provides [`BalancedTree`], a binary search tree whose shape is
//! fixed by a single bulk-construction pass instead of by rebalancing on
//! every mutation.
//!
//! # Overview
//!
//! Construction runs in two stages:
//!
//! 1. The key/item pairs are sorted by key with a stable merge sort
//!    ([`crate::sort`]).
//! 2. The sorted sequence is turned into a tree by making the median of each
//!    range the root of its subtree ([`build_balanced`]).
//!
//! The resulting tree has height `floor(log2(n)) + 1` for `n` elements, and
//! every node records its depth (the root has depth 1).
//!
//! - O(n log n) construction
//! - O(log N) get on a freshly built tree
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use balanced_bst::BalancedTree;
//!
//! let tree = BalancedTree::from_elements(vec![(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")]);
//!
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &4);
//! assert_eq!(root.depth(), 1);
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &8]);
//! ```
//!
//! # Duplicate Keys
//!
//! Keys are expected to be unique. When they are not, construction still
//! succeeds and equal keys appear in the in-order traversal in the same
//! relative order as in the input, but lookups for a repeated key return
//! whichever of the equal entries the search reaches first.

mod build;
mod error;
mod iter;
mod node;

pub use build::build_balanced;
#[cfg(feature = "rayon")]
pub use build::par_build_balanced;
pub use error::BuildError;
pub use iter::{IntoIter, Iter};
pub use node::TreeNode;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use build::ROOT_DEPTH;
use iter::InOrderNodes;
use node::{Link, clone_link};

use crate::sort::merge_sort_by;

// =============================================================================
// BalancedTree Definition
// =============================================================================

/// A binary search tree built balanced from a known set of key/item pairs.
///
/// The tree owns its root, and every node owns its children, so dropping the
/// tree releases everything. Equality is structural: two trees are equal
/// when they have the same shape and the same key, item and depth at every
/// position.
///
/// # Time Complexity
///
/// | Operation       | Complexity        |
/// |-----------------|-------------------|
/// | `from_elements` | O(n log n)        |
/// | `from_sorted`   | O(n)              |
/// | `get`           | O(height)         |
/// | `insert`        | O(height)         |
/// | `height`        | O(n)              |
/// | `rebalance`     | O(n)              |
/// | `len`           | O(1)              |
/// | `is_empty`      | O(1)              |
///
/// After bulk construction the height is `floor(log2(n)) + 1`. Plain
/// [`insert`](Self::insert) can make the tree taller;
/// [`rebalance`](Self::rebalance) restores the minimal height.
///
/// # Examples
///
/// ```rust
/// use balanced_bst::BalancedTree;
///
/// let tree: BalancedTree<u32, u32> = (0..1000).map(|key| (key, key * key)).collect();
///
/// assert_eq!(tree.len(), 1000);
/// assert_eq!(tree.get(&12), Some(&144));
/// assert_eq!(tree.height(), 10);
/// ```
pub struct BalancedTree<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of nodes reachable from the root
    length: usize,
}

/// Height of a tree built by median split from `length` elements.
const fn balanced_height(length: usize) -> usize {
    (usize::BITS - length.leading_zeros()) as usize
}

impl<K, V> BalancedTree<K, V> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree: BalancedTree<i32, String> = BalancedTree::new();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the root node, if any.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode<K, V>> {
        self.root.as_deref()
    }

    /// Returns the greatest node depth in the tree, or 0 when it is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree: BalancedTree<u32, ()> = (0..1000).map(|key| (key, ())).collect();
    /// assert_eq!(tree.height(), 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        InOrderNodes::new(self.root())
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns an iterator over entries in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root(), self.length)
    }

    /// Returns an iterator over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over items in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, item)| item)
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some((node.key(), node.item()))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some((node.key(), node.item()))
    }

    /// Replaces the contents of the tree with a balanced tree built from
    /// `sorted`.
    fn replace_with_sorted(&mut self, sorted: Vec<(K, V)>) {
        let (root, length) = build_balanced(sorted);
        self.root = root;
        self.length = length;
    }
}

impl<K: Ord, V> BalancedTree<K, V> {
    /// Builds a balanced tree from an arbitrary collection of pairs.
    ///
    /// The pairs are sorted by key (stably, so equal keys keep their input
    /// order) and the median of each sorted range becomes a subtree root.
    /// The collection is expected to be non-empty with unique keys; an
    /// empty collection yields an empty tree.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree = BalancedTree::from_elements(vec![(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")]);
    ///
    /// let root = tree.root().unwrap();
    /// assert_eq!((root.key(), root.item(), root.depth()), (&4, &"d", 1));
    /// assert_eq!(tree.len(), 5);
    /// ```
    #[must_use]
    pub fn from_elements(elements: Vec<(K, V)>) -> Self {
        let sorted = merge_sort_by(elements, |left, right| left.0.cmp(&right.0));
        let tree = Self::from_sorted(sorted);
        tracing::debug!(
            elements = tree.length,
            height = balanced_height(tree.length),
            "built balanced tree"
        );
        tree
    }

    /// Builds a balanced tree from a non-empty collection of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyInput`] if `elements` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::{BalancedTree, BuildError};
    ///
    /// let tree = BalancedTree::try_from_elements(vec![(42, "x")]).unwrap();
    /// assert_eq!(tree.len(), 1);
    ///
    /// let empty = BalancedTree::<i32, &str>::try_from_elements(Vec::new());
    /// assert_eq!(empty.unwrap_err(), BuildError::EmptyInput);
    /// ```
    pub fn try_from_elements(elements: Vec<(K, V)>) -> Result<Self, BuildError> {
        if elements.is_empty() {
            tracing::debug!("rejected empty element collection");
            return Err(BuildError::EmptyInput);
        }
        Ok(Self::from_elements(elements))
    }

    /// Builds a balanced tree from pairs already sorted by key.
    ///
    /// Sortedness is only checked in debug builds. Use
    /// [`try_from_sorted`](Self::try_from_sorted) to check it always.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Panics
    ///
    /// Debug builds panic if `sorted` is not in non-decreasing key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree = BalancedTree::from_sorted(vec![(1, 'a'), (2, 'b'), (3, 'c')]);
    /// assert_eq!(tree.root().map(|node| *node.key()), Some(2));
    /// ```
    #[must_use]
    pub fn from_sorted(sorted: Vec<(K, V)>) -> Self {
        debug_assert!(
            first_unsorted_index(&sorted).is_none(),
            "elements must be sorted by key"
        );
        let mut tree = Self::new();
        tree.replace_with_sorted(sorted);
        tree
    }

    /// Builds a balanced tree from pairs that must be sorted by key.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnsortedInput`] with the index of the first pair
    /// whose key is less than the key before it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::{BalancedTree, BuildError};
    ///
    /// assert!(BalancedTree::try_from_sorted(vec![(1, 'a'), (1, 'b'), (2, 'c')]).is_ok());
    /// assert_eq!(
    ///     BalancedTree::try_from_sorted(vec![(2, 'a'), (1, 'b')]).unwrap_err(),
    ///     BuildError::UnsortedInput { index: 1 }
    /// );
    /// ```
    pub fn try_from_sorted(sorted: Vec<(K, V)>) -> Result<Self, BuildError> {
        if let Some(index) = first_unsorted_index(&sorted) {
            tracing::debug!(index, "rejected unsorted element sequence");
            return Err(BuildError::UnsortedInput { index });
        }
        Ok(Self::from_sorted(sorted))
    }

    /// Returns a reference to the item corresponding to the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree = BalancedTree::from_elements(vec![("hello".to_string(), 42)]);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(TreeNode::item)
    }

    /// Returns a mutable reference to the item corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.item),
            }
        }
        None
    }

    /// Returns `true` if the tree contains an entry for the key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Returns the depth of the node holding the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let tree = BalancedTree::from_elements(vec![(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")]);
    /// assert_eq!(tree.depth_of(&4), Some(1));
    /// assert_eq!(tree.depth_of(&1), Some(3));
    /// assert_eq!(tree.depth_of(&7), None);
    /// ```
    #[must_use]
    pub fn depth_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(TreeNode::depth)
    }

    fn find_node<Q>(&self, key: &Q) -> Option<&TreeNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    /// Inserts a key-item pair without rebalancing.
    ///
    /// If the tree already contains the key, the item is replaced and the
    /// old item is returned. Otherwise a new leaf is attached one level
    /// below its parent and `None` is returned.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let mut tree = BalancedTree::from_elements(vec![(2, "b"), (1, "a"), (3, "c")]);
    ///
    /// assert_eq!(tree.insert(4, "d"), None);
    /// assert_eq!(tree.depth_of(&4), Some(3));
    /// assert_eq!(tree.insert(1, "A"), Some("a"));
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn insert(&mut self, key: K, item: V) -> Option<V> {
        let mut link = &mut self.root;
        let mut depth = ROOT_DEPTH;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Some(std::mem::replace(&mut node.item, item)),
            };
            depth += 1;
        }
        *link = Some(Box::new(TreeNode::new(key, item, depth)));
        self.length += 1;
        None
    }

    /// Rebuilds the tree from its own entries so that it is balanced again.
    ///
    /// Depths are reassigned from the new shape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new();
    /// for key in 0..100 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.height(), 100);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 7);
    /// assert_eq!(tree.len(), 100);
    /// ```
    pub fn rebalance(&mut self) {
        let entries: Vec<(K, V)> = IntoIter::new(self.root.take(), self.length).collect();
        self.replace_with_sorted(entries);
        tracing::debug!(
            elements = self.length,
            height = balanced_height(self.length),
            "rebalanced tree"
        );
    }
}

#[cfg(feature = "rayon")]
impl<K, V> BalancedTree<K, V>
where
    K: Ord + Send + Sync,
    V: Send + Sync,
{
    /// Builds a balanced tree like [`from_elements`](Self::from_elements),
    /// sorting and building large ranges in parallel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use balanced_bst::BalancedTree;
    ///
    /// let elements: Vec<(u32, u32)> = (0..20_000).rev().map(|key| (key, key)).collect();
    /// let tree = BalancedTree::par_from_elements(elements.clone());
    ///
    /// assert_eq!(tree, BalancedTree::from_elements(elements));
    /// ```
    #[must_use]
    pub fn par_from_elements(elements: Vec<(K, V)>) -> Self {
        let sorted = crate::sort::par_merge_sort_by(elements, |left, right| left.0.cmp(&right.0));
        let (root, length) = build::par_build_balanced(sorted);
        tracing::debug!(
            elements = length,
            height = balanced_height(length),
            "built balanced tree in parallel"
        );
        Self { root, length }
    }
}

/// Returns the index of the first pair whose key is less than its
/// predecessor's.
fn first_unsorted_index<K: Ord, V>(elements: &[(K, V)]) -> Option<usize> {
    elements
        .windows(2)
        .position(|pair| pair[1].0 < pair[0].0)
        .map(|position| position + 1)
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Drop for BalancedTree<K, V> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Clone, V: Clone> Clone for BalancedTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: clone_link(&self.root),
            length: self.length,
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BalancedTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.root() == other.root()
    }
}

impl<K: Eq, V: Eq> Eq for BalancedTree<K, V> {}

impl<K, V> Default for BalancedTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BalancedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}

impl<K, V> IntoIterator for BalancedTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), self.length)
    }
}

impl<'a, K, V> IntoIterator for &'a BalancedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BalancedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for BalancedTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, item) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {item}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for BalancedTree<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for entry in self {
            sequence.serialize_element(&entry)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BalancedTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Entries are collected first so the tree is built balanced in one pass.
        let elements = <Vec<(K, V)> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_elements(elements))
    }
}

// =============================================================================
// Tests
// =============================================================================


// =============================================================================
// Serde Tests
// =============================================================================
