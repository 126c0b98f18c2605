//! BPlusTree - the multi-node algorithms.
//!
//! The tree owns a [`NodeArena`] and the id of the root node. Lookup walks
//! down from the root choosing child slots with [`Page::find`]; insertion
//! and removal live in the sibling `insert` and `remove` modules.
//!
//! [`Page::find`]: crate::storage::page::Page::find

use tracing::trace;

use crate::common::config::MIN_ORDER;
use crate::common::{Error, NodeId, Result};
use crate::storage::page::SearchResult;

use super::arena::NodeArena;
use super::node::Node;
use super::stats::TreeStats;

/// An in-memory B+Tree of unique keys with fan-out `ORDER`.
///
/// Every node holds at most `ORDER - 1` keys and every leaf sits at the
/// same depth. Keys are stored in leaves; internal nodes hold copies of
/// leaf keys as separators.
///
/// # Single-threaded
/// No operation suspends or locks. Wrap the tree in a
/// [`SharedTree`](crate::concurrency::SharedTree) to share it.
///
/// # Example
/// ```
/// use pagetree::{BPlusTree, Error};
///
/// let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
/// for key in [5, 1, 9, 3, 7] {
///     assert!(tree.add(key).unwrap());
/// }
/// assert!(!tree.add(5).unwrap()); // already present
///
/// assert_eq!(tree.find(&7), Ok(&7));
/// assert_eq!(tree.find(&4), Err(Error::KeyNotFound));
/// assert_eq!(tree.keys(), vec![1, 3, 5, 7, 9]);
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree<K, const ORDER: usize> {
    /// Owns every node.
    pub(super) arena: NodeArena<K, ORDER>,

    /// `None` while the tree holds no keys.
    pub(super) root: Option<NodeId>,

    /// Number of keys stored in leaves.
    pub(super) len: usize,

    pub(super) stats: TreeStats,
}

impl<K, const ORDER: usize> BPlusTree<K, ORDER> {
    /// Create an empty tree.
    ///
    /// Fails to compile for `ORDER < 3`.
    pub fn new() -> Self {
        const { assert!(ORDER >= MIN_ORDER, "B+Tree order must be >= 3") };

        Self {
            arena: NodeArena::new(),
            root: None,
            len: 0,
            stats: TreeStats::default(),
        }
    }

    /// Maximum number of children per internal node.
    #[inline]
    pub const fn order(&self) -> usize {
        ORDER
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Id of the root node, if any.
    #[inline]
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Inspect a live node.
    pub fn node(&self, node_id: NodeId) -> Option<&Node<K, ORDER>> {
        self.arena.get_checked(node_id)
    }

    /// Number of nodes currently in the tree.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Number of levels: 0 when empty, 1 for a lone root leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node_id) = current {
            height += 1;
            current = self.arena.get(node_id).children().first().copied();
        }
        height
    }

    /// Snapshot of the restructuring counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Remove every key and reset the counters.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.stats.reset();
    }
}

impl<K: Ord + Clone, const ORDER: usize> BPlusTree<K, ORDER> {
    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Look up `key` and return the stored copy.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is absent (including an empty tree)
    pub fn find(&self, key: &K) -> Result<&K> {
        let root = self.root.ok_or(Error::KeyNotFound)?;

        let (leaf, search) = self.descend(root, key)?;
        if !search.found {
            return Err(Error::KeyNotFound);
        }
        self.arena.get(leaf).page().get(search.index)
    }

    /// Whether `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_ok()
    }

    /// All keys in increasing order.
    ///
    /// Walks the tree depth-first; leaves are not chained.
    pub fn keys(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            self.collect_keys(root, &mut out);
        }
        out
    }

    fn collect_keys(&self, node_id: NodeId, out: &mut Vec<K>) {
        let node = self.arena.get(node_id);
        if node.is_leaf() {
            out.extend(node.page().iter().cloned());
            return;
        }
        for &child in node.children() {
            self.collect_keys(child, out);
        }
    }

    // ========================================================================
    // Internal: Descent
    // ========================================================================

    /// Walk from `root` to the leaf responsible for `key`.
    ///
    /// Returns the leaf and the leaf page's search result: the match
    /// position, or the insertion point when `key` is absent.
    ///
    /// | page.find | node     | action                   |
    /// |-----------|----------|--------------------------|
    /// | found     | leaf     | done                     |
    /// | found     | internal | descend into `index + 1` |
    /// | missing   | leaf     | done (absent)            |
    /// | missing   | internal | descend into `index`     |
    pub(super) fn descend(&self, root: NodeId, key: &K) -> Result<(NodeId, SearchResult)> {
        let mut node_id = root;
        loop {
            let node = self.arena.get(node_id);
            if node.is_leaf() {
                let search = node.page().find(key)?;
                return Ok((node_id, search));
            }

            let slot = node.child_slot(key)?;
            trace!(node = %node_id, slot, "btree.descend");
            node_id = node.children()[slot];
        }
    }
}

impl<K, const ORDER: usize> Default for BPlusTree<K, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}
