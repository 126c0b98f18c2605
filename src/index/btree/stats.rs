//! Tree restructuring statistics.

use std::fmt;

/// Counts of structural events since the tree was created or cleared.
///
/// The tree is single-threaded, so these are plain counters rather than
/// atomics; [`BPlusTree::stats`](crate::BPlusTree::stats) hands out a copy.
///
/// # Example
/// ```
/// use pagetree::BPlusTree;
///
/// let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
/// for key in 0..4 {
///     tree.add(key).unwrap();
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.leaf_splits, 1);
/// assert_eq!(stats.root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Overflowing leaves split in two.
    pub leaf_splits: u64,

    /// Overflowing internal nodes split in two.
    pub internal_splits: u64,

    /// Times a split reached the root and a new root was created.
    pub root_splits: u64,

    /// Underflows fixed by moving one key from a sibling.
    pub borrows: u64,

    /// Underflows fixed by merging two siblings.
    pub merges: u64,

    /// Times an empty internal root was replaced by its only child.
    pub root_collapses: u64,
}

impl TreeStats {
    /// Total number of node splits.
    pub fn splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {} (leaf: {}, internal: {}), root_splits: {}, borrows: {}, merges: {}, root_collapses: {} }}",
            self.splits(),
            self.leaf_splits,
            self.internal_splits,
            self.root_splits,
            self.borrows,
            self.merges,
            self.root_collapses
        )
    }
}
