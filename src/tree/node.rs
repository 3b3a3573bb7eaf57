//! Tree node definition.

use std::fmt;

/// Owning link to a child subtree.
pub(crate) type Link<K, V> = Option<Box<TreeNode<K, V>>>;

/// A node of a [`BalancedTree`](crate::BalancedTree).
///
/// Each node exclusively owns its children. The depth is fixed when the node
/// is created (the root has depth 1) and is never recomputed.
///
/// Nodes are created and linked only by the crate's builder and by
/// [`BalancedTree::insert`](crate::BalancedTree::insert); callers get
/// read-only views through [`BalancedTree::root`](crate::BalancedTree::root).
/// Keeping construction private is what lets every node's depth and key
/// order be trusted.
///
/// Equality compares whole subtrees (shape, keys, items and depths) and runs
/// with an explicit stack, so it works on trees of any height. `Debug` prints
/// only the node itself and the keys of its children.
pub struct TreeNode<K, V> {
    pub(crate) key: K,
    pub(crate) item: V,
    pub(crate) depth: usize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> TreeNode<K, V> {
    /// Creates a node with no children.
    pub(crate) const fn new(key: K, item: V, depth: usize) -> Self {
        Self {
            key,
            item,
            depth,
            left: None,
            right: None,
        }
    }

    /// Returns the key of this node.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the item stored with the key.
    #[inline]
    pub const fn item(&self) -> &V {
        &self.item
    }

    /// Returns the depth of this node. The root has depth 1.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the left child, whose subtree holds the smaller keys.
    #[inline]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, whose subtree holds the larger keys.
    #[inline]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Splits the node into its entry and its child links.
    pub(crate) fn into_parts(self) -> ((K, V), Link<K, V>, Link<K, V>) {
        ((self.key, self.item), self.left, self.right)
    }
}

/// Deep-copies the subtree behind `link` without recursion.
///
/// Nodes are rebuilt in post-order: a node is copied once both of its
/// children are on the `built` stack, right child on top.
pub(crate) fn clone_link<K: Clone, V: Clone>(link: &Link<K, V>) -> Link<K, V> {
    let mut pending: Vec<(&TreeNode<K, V>, bool)> =
        link.as_deref().map(|node| (node, false)).into_iter().collect();
    let mut built: Vec<Box<TreeNode<K, V>>> = Vec::new();

    while let Some((node, children_built)) = pending.pop() {
        if children_built {
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            let mut copy = TreeNode::new(node.key.clone(), node.item.clone(), node.depth);
            copy.left = left;
            copy.right = right;
            built.push(Box::new(copy));
        } else {
            pending.push((node, true));
            pending.extend(node.right().map(|right| (right, false)));
            pending.extend(node.left().map(|left| (left, false)));
        }
    }
    built.pop()
}

/// Queues a pair of children for comparison. Returns `false` when exactly
/// one side is missing.
fn push_pair<'a, K, V>(
    pending: &mut Vec<(&'a TreeNode<K, V>, &'a TreeNode<K, V>)>,
    this: Option<&'a TreeNode<K, V>>,
    that: Option<&'a TreeNode<K, V>>,
) -> bool {
    match (this, that) {
        (Some(this), Some(that)) => {
            pending.push((this, that));
            true
        }
        (None, None) => true,
        _ => false,
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for TreeNode<K, V> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((this, that)) = pending.pop() {
            if this.depth != that.depth || this.key != that.key || this.item != that.item {
                return false;
            }
            if !push_pair(&mut pending, this.left(), that.left())
                || !push_pair(&mut pending, this.right(), that.right())
            {
                return false;
            }
        }
        true
    }
}

impl<K: Eq, V: Eq> Eq for TreeNode<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeNode<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TreeNode")
            .field("key", &self.key)
            .field("item", &self.item)
            .field("depth", &self.depth)
            .field("left", &self.left().map(Self::key))
            .field("right", &self.right().map(Self::key))
            .finish()
    }
}
