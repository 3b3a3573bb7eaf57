#![cfg(feature = "serde")]

//! Integration tests for serde support.

use balanced_bst::BalancedTree;
use rstest::rstest;

#[rstest]
fn test_tree_json_roundtrip() {
    let tree: BalancedTree<String, i32> = (0..50).map(|index| (format!("key{index:02}"), index)).collect();
    let json = serde_json::to_string(&tree).unwrap();
    let restored: BalancedTree<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, restored);
}

#[rstest]
fn test_tree_json_format_is_ordered_pairs() {
    let tree = BalancedTree::from_elements(vec![(2, true), (1, false)]);
    assert_eq!(serde_json::to_string(&tree).unwrap(), "[[1,false],[2,true]]");
}

#[rstest]
fn test_deserialize_unsorted_input_is_balanced() {
    let json = serde_json::to_string(&(0..100).rev().map(|key| (key, key)).collect::<Vec<(i32, i32)>>()).unwrap();
    let tree: BalancedTree<i32, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(tree.len(), 100);
    assert_eq!(tree.height(), 7);
    assert_eq!(tree.min(), Some((&0, &0)));
}

#[rstest]
fn test_deserialize_duplicate_keys_keeps_all_entries() {
    let tree: BalancedTree<i32, char> = serde_json::from_str(r#"[[1,"b"],[0,"a"],[1,"c"]]"#).unwrap();
    let entries: Vec<(i32, char)> = tree.into_iter().collect();
    assert_eq!(entries, vec![(0, 'a'), (1, 'b'), (1, 'c')]);
}

#[rstest]
fn test_deserialize_rejects_malformed_input() {
    let result: Result<BalancedTree<i32, i32>, _> = serde_json::from_str(r#"{"1": 2}"#);
    assert!(result.is_err());
}
