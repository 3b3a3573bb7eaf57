//! In-order iterators over a [`BalancedTree`](crate::BalancedTree).

use super::node::{Link, TreeNode};

/// Walks nodes in key order with an explicit stack of pending ancestors.
pub(crate) struct InOrderNodes<'a, K, V> {
    stack: Vec<&'a TreeNode<K, V>>,
}

impl<'a, K, V> InOrderNodes<'a, K, V> {
    pub(crate) fn new(root: Option<&'a TreeNode<K, V>>) -> Self {
        let mut nodes = Self { stack: Vec::new() };
        nodes.push_left_spine(root);
        nodes
    }

    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K, V> Iterator for InOrderNodes<'a, K, V> {
    type Item = &'a TreeNode<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// An iterator over key-item pairs of a [`BalancedTree`](crate::BalancedTree)
/// in key order.
pub struct Iter<'a, K, V> {
    nodes: InOrderNodes<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a TreeNode<K, V>>, length: usize) -> Self {
        Self {
            nodes: InOrderNodes::new(root),
            remaining: length,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key(), node.item()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over key-item pairs of a
/// [`BalancedTree`](crate::BalancedTree) in key order.
///
/// Nodes are taken apart as they are visited, so dropping the iterator
/// early releases the rest of the tree without recursion.
pub struct IntoIter<K, V> {
    stack: Vec<Box<TreeNode<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::new(),
            remaining: length,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let (entry, _, right) = (*node).into_parts();
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        while let Some(node) = self.stack.pop() {
            let (_, _, right) = (*node).into_parts();
            self.push_left_spine(right);
        }
    }
}
