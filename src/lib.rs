//! # balanced-bst
//!
//! Height-balanced binary search trees built in a single pass from a
//! collection of key/item pairs that is known up front.
//!
//! ## Overview
//!
//! When every element of a search tree is available before the tree is
//! built, no rotations or color bits are needed to keep it shallow. The
//! pairs are sorted once and the median of every sorted range becomes the
//! root of the subtree for that range, which bounds the height by
//! `ceil(log2(n + 1))`.
//!
//! - **Sorting**: [`sort`] provides a stable merge sort
//! - **Building**: [`tree::build_balanced`] turns a sorted sequence into a
//!   balanced tree shape
//! - **Tree**: [`BalancedTree`] owns the result and supports lookup,
//!   in-order traversal and plain insertion
//!
//! ## Feature Flags
//!
//! - `rayon`: Parallel sorting and construction
//! - `serde`: Serialization support for [`BalancedTree`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use balanced_bst::prelude::*;
//!
//! let tree = BalancedTree::from_elements(vec![(5, "e"), (3, "c"), (8, "h"), (1, "a"), (4, "d")]);
//!
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.get(&8), Some(&"h"));
//! assert_eq!(tree.height(), 3);
//!
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &8]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use balanced_bst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::sort::{merge_sort, merge_sort_by, merge_sort_by_cached_key, merge_sort_by_key};
    pub use crate::tree::{BalancedTree, BuildError, TreeNode};

    #[cfg(feature = "rayon")]
    pub use crate::sort::par_merge_sort_by;
}

pub mod sort;
pub mod tree;

pub use tree::{BalancedTree, BuildError, TreeNode};

/// Number of elements below which parallel operations fall back to the
/// sequential algorithm.
///
/// Splitting smaller ranges costs more in task scheduling than it saves.
#[cfg(feature = "rayon")]
pub const PARALLEL_THRESHOLD: usize = 4096;
