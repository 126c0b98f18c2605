//! Node - one vertex of the tree.
//!
//! A [`Node`] holds a [`Page`] of keys, the ids of the children it owns, and
//! the id of its parent. It has no behavior of its own beyond the derived
//! leaf predicate; every multi-node algorithm lives on the tree.

use crate::common::config::{min_internal_keys, min_leaf_keys};
use crate::common::NodeId;
use crate::storage::page::Page;

/// A tree vertex for a tree of fan-out `ORDER`.
///
/// # Capacity
/// The page is typed with capacity `ORDER`, one more than the node ever keeps
/// at rest (`ORDER - 1`). The spare slot is where an insertion stages the
/// overflowing key before the node is split:
///
/// ```text
///   at rest:      [k0 k1 k2 __]   len = ORDER - 1  (full)
///   staged:       [k0 k1 k2 k3]   len = ORDER      (overflowing, split next)
/// ```
///
/// # Children
/// For an internal node with `n` keys exactly `n + 1` child slots are used:
/// child `0` covers keys `< key 0`, child `i` covers `[key i-1, key i)`, and
/// the last child covers keys `>= key n-1`. A leaf owns no children.
#[derive(Debug, Clone)]
pub struct Node<K, const ORDER: usize> {
    page: Page<K, ORDER>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<K, const ORDER: usize> Node<K, ORDER> {
    /// Create a leaf around `page`.
    pub(crate) fn leaf(page: Page<K, ORDER>, parent: Option<NodeId>) -> Self {
        Self {
            page,
            children: Vec::with_capacity(ORDER + 1),
            parent,
        }
    }

    /// Create an internal node. `children.len()` must be `page.len() + 1`.
    pub(crate) fn internal(
        page: Page<K, ORDER>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    ) -> Self {
        debug_assert_eq!(children.len(), page.len() + 1);
        Self {
            page,
            children,
            parent,
        }
    }

    // ========================================================================
    // Structural accessors
    // ========================================================================

    #[inline]
    pub fn page(&self) -> &Page<K, ORDER> {
        &self.page
    }

    #[inline]
    pub(crate) fn page_mut(&mut self) -> &mut Page<K, ORDER> {
        &mut self.page
    }

    /// Occupied child slots, in key order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// A node is a leaf iff none of its child slots are occupied.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Holds `ORDER - 1` keys: the next insertion will overflow it.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.page.len() >= ORDER - 1
    }

    /// Holds `ORDER` keys and must be split before the operation ends.
    #[inline]
    pub(crate) fn is_overflowing(&self) -> bool {
        self.page.is_full()
    }

    /// Fewest keys this node may hold when it is not the root.
    #[inline]
    pub(crate) fn min_keys(&self) -> usize {
        if self.is_leaf() {
            min_leaf_keys(ORDER)
        } else {
            min_internal_keys(ORDER)
        }
    }

    /// Position of `child` among this node's child slots.
    ///
    /// # Panics
    /// Panics if `child` is not owned by this node, which means parent and
    /// child links disagree.
    pub(crate) fn slot_of(&self, child: NodeId) -> usize {
        match self.children.iter().position(|&c| c == child) {
            Some(slot) => slot,
            None => panic!("{} is not a child of its parent", child),
        }
    }

    /// Reset to an empty, detached leaf.
    pub(crate) fn reset(&mut self) {
        self.page.clear();
        self.children.clear();
        self.parent = None;
    }
}

impl<K: Ord, const ORDER: usize> Node<K, ORDER> {
    /// Child slot to descend into when looking for `key`.
    ///
    /// An exact match on a separator goes right: keys equal to a separator
    /// live in the subtree that follows it.
    pub(crate) fn child_slot(&self, key: &K) -> crate::common::Result<usize> {
        let search = self.page.find(key)?;
        Ok(if search.found {
            search.index + 1
        } else {
            search.index
        })
    }
}
