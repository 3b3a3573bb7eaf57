//! Error types for checked tree construction.

/// Represents a rejected input to a checked constructor.
///
/// The unchecked constructors ([`BalancedTree::from_elements`] and
/// [`BalancedTree::from_sorted`]) never fail. These errors only come from
/// the `try_*` variants, which verify the preconditions the unchecked
/// constructors assume.
///
/// [`BalancedTree::from_elements`]: crate::BalancedTree::from_elements
/// [`BalancedTree::from_sorted`]: crate::BalancedTree::from_sorted
///
/// # Examples
///
/// ```rust
/// use balanced_bst::{BalancedTree, BuildError};
///
/// let result = BalancedTree::try_from_sorted(vec![(1, 'a'), (3, 'c'), (2, 'b')]);
/// assert_eq!(result.unwrap_err(), BuildError::UnsortedInput { index: 2 });
/// assert_eq!(
///     format!("{}", BuildError::UnsortedInput { index: 2 }),
///     "element at index 2 has a key less than its predecessor"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The element collection was empty.
    EmptyInput,
    /// The element at `index` has a key strictly less than the key before it.
    UnsortedInput {
        /// Position of the first out-of-order element.
        index: usize,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(formatter, "cannot build a tree from an empty collection"),
            Self::UnsortedInput { index } => write!(
                formatter,
                "element at index {index} has a key less than its predecessor"
            ),
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        assert_eq!(
            format!("{}", BuildError::EmptyInput),
            "cannot build a tree from an empty collection"
        );
    }

    #[test]
    fn test_unsorted_input_display() {
        assert_eq!(
            format!("{}", BuildError::UnsortedInput { index: 7 }),
            "element at index 7 has a key less than its predecessor"
        );
    }

    #[test]
    fn test_build_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(BuildError::EmptyInput);
        assert!(error.source().is_none());
    }
}
