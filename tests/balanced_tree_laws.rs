//! Property-based tests for BalancedTree.
//!
//! These tests verify that bulk construction satisfies its ordering,
//! completeness, balance, stability and determinism laws using proptest.

use balanced_bst::{BalancedTree, TreeNode};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

/// Number of nodes in the subtree rooted at `node`.
fn subtree_size<K, V>(node: Option<&TreeNode<K, V>>) -> usize {
    node.map_or(0, |node| {
        1 + subtree_size(node.left()) + subtree_size(node.right())
    })
}

/// Checks the median-split size rule and depth bookkeeping for every node.
fn assert_median_split<K, V>(node: Option<&TreeNode<K, V>>, expected_depth: usize) -> usize {
    let Some(node) = node else {
        return 0;
    };
    assert_eq!(node.depth(), expected_depth);

    let left_size = assert_median_split(node.left(), expected_depth + 1);
    let right_size = assert_median_split(node.right(), expected_depth + 1);
    let size = left_size + 1 + right_size;
    assert_eq!(left_size, size / 2);
    assert_eq!(right_size, size - size / 2 - 1);
    size
}

/// Smallest `h` with `2^h >= n + 1`.
fn ceil_log2_plus_one(length: usize) -> usize {
    let mut height = 0;
    while (1usize << height) < length + 1 {
        height += 1;
    }
    height
}

fn stable_sorted<V: Clone>(elements: &[(i32, V)]) -> Vec<(i32, V)> {
    let mut sorted = elements.to_vec();
    sorted.sort_by_key(|pair| pair.0);
    sorted
}

// =============================================================================
// Ordering and Completeness Laws
// =============================================================================

proptest! {
    /// Law: in-order traversal yields keys in non-decreasing order.
    #[test]
    fn prop_in_order_keys_are_sorted(
        elements in prop::collection::vec((any::<i32>(), any::<i32>()), 0..200)
    ) {
        let tree = BalancedTree::from_elements(elements);
        let keys: Vec<&i32> = tree.keys().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    /// Law: the node count equals the input length and every pair appears
    /// exactly once.
    #[test]
    fn prop_every_pair_appears_once(
        elements in prop::collection::vec((any::<i32>(), any::<u8>()), 0..200)
    ) {
        let expected = stable_sorted(&elements);
        let tree = BalancedTree::from_elements(elements.clone());

        prop_assert_eq!(tree.len(), elements.len());
        prop_assert_eq!(tree.iter().len(), elements.len());
        let entries: Vec<(i32, u8)> = tree.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }

    /// Law: with unique keys every key is found with its own item.
    #[test]
    fn prop_lookup_finds_every_key(
        keys in prop::collection::btree_set(any::<i32>(), 0..200)
    ) {
        let tree: BalancedTree<i32, i64> = keys.iter().map(|&key| (key, i64::from(key) * 2)).collect();
        for key in &keys {
            let expected = i64::from(*key) * 2;
            prop_assert_eq!(tree.get(key), Some(&expected));
        }
    }
}

// =============================================================================
// Balance Laws
// =============================================================================

proptest! {
    /// Law: each node splits its range at the median and records its depth.
    #[test]
    fn prop_median_split_shape(
        elements in prop::collection::vec((any::<i32>(), any::<i32>()), 0..300)
    ) {
        let length = elements.len();
        let tree = BalancedTree::from_elements(elements);
        prop_assert_eq!(assert_median_split(tree.root(), 1), length);
        prop_assert_eq!(subtree_size(tree.root()), tree.len());
    }

    /// Law: height never exceeds ceil(log2(n + 1)).
    #[test]
    fn prop_height_is_logarithmic(length in 0usize..5000) {
        let tree: BalancedTree<usize, ()> = (0..length).map(|key| (key, ())).collect();
        prop_assert!(tree.height() <= ceil_log2_plus_one(length));
    }
}

// =============================================================================
// Stability and Determinism Laws
// =============================================================================

proptest! {
    /// Law: pairs with equal keys keep their input order.
    #[test]
    fn prop_equal_keys_keep_input_order(
        keys in prop::collection::vec(0i32..5, 0..100)
    ) {
        let elements: Vec<(i32, usize)> = keys.into_iter().zip(0..).collect();
        let tree = BalancedTree::from_elements(elements);

        let entries: Vec<(&i32, &usize)> = tree.iter().collect();
        for pair in entries.windows(2) {
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    /// Law: building twice from the same input gives the same tree.
    #[test]
    fn prop_construction_is_deterministic(
        elements in prop::collection::vec((0i32..50, any::<i32>()), 0..100)
    ) {
        let first = BalancedTree::from_elements(elements.clone());
        let second = BalancedTree::from_elements(elements);
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Insert and Rebalance Laws
// =============================================================================

proptest! {
    /// Law: inserting a new key grows the tree by one and makes the key
    /// reachable.
    #[test]
    fn prop_insert_new_key(
        keys in prop::collection::btree_set(any::<i32>(), 1..100),
        key: i32,
        item: i32
    ) {
        let mut tree: BalancedTree<i32, i32> = keys.iter().map(|&key| (key, key)).collect();
        let before = tree.len();
        let previous = tree.insert(key, item);

        prop_assert_eq!(previous.is_some(), keys.contains(&key));
        prop_assert_eq!(tree.len(), if keys.contains(&key) { before } else { before + 1 });
        prop_assert_eq!(tree.get(&key), Some(&item));
    }

    /// Law: rebalancing after inserts gives the same tree as building from
    /// the final contents.
    #[test]
    fn prop_rebalance_matches_fresh_build(
        initial in prop::collection::btree_set(any::<i16>(), 1..50),
        inserted in prop::collection::vec(any::<i16>(), 0..50)
    ) {
        let mut tree: BalancedTree<i16, ()> = initial.iter().map(|&key| (key, ())).collect();
        for key in &inserted {
            tree.insert(*key, ());
        }
        tree.rebalance();

        let mut all_keys = initial;
        all_keys.extend(inserted);
        let expected: BalancedTree<i16, ()> = all_keys.into_iter().map(|key| (key, ())).collect();
        prop_assert_eq!(tree, expected);
    }
}
