//! Removal with borrow-or-merge rebalancing.
//!
//! After a key leaves its leaf, an underflowing node is repaired by, in
//! order of preference:
//!
//! 1. borrowing one key from its left sibling,
//! 2. borrowing one key from its right sibling,
//! 3. merging with a sibling (left preferred), which takes one separator and
//!    one child slot away from the parent and may underflow it in turn.
//!
//! An internal root left with no separators is replaced by its only child.
//! Separators may keep naming keys that were removed; only their ordering
//! against the children's key ranges matters.

use tracing::debug;

use crate::common::{Error, NodeId, Result};

use super::tree::BPlusTree;

impl<K: Ord + Clone, const ORDER: usize> BPlusTree<K, ORDER> {
    // ========================================================================
    // Public API: Removal
    // ========================================================================

    /// Remove `key` and return it.
    ///
    /// # Errors
    /// - `Error::EmptyTree` if the tree holds no keys
    /// - `Error::KeyNotFound` if `key` is absent; the tree is untouched
    pub fn rmv(&mut self, key: &K) -> Result<K> {
        let root = self.root.ok_or(Error::EmptyTree)?;

        let (leaf, search) = self.descend(root, key)?;
        if !search.found {
            return Err(Error::KeyNotFound);
        }

        let removed = self.arena.get_mut(leaf).page_mut().remove_at(search.index)?;
        self.len -= 1;

        self.rebalance(leaf)?;
        Ok(removed)
    }

    // ========================================================================
    // Internal: Rebalancing
    // ========================================================================

    /// Repair underflow from `node_id` upward.
    fn rebalance(&mut self, mut node_id: NodeId) -> Result<()> {
        loop {
            let node = self.arena.get(node_id);
            let parent_id = match node.parent() {
                Some(parent_id) => parent_id,
                None => {
                    self.shrink_root(node_id);
                    return Ok(());
                }
            };

            let min_keys = node.min_keys();
            if node.page().len() >= min_keys {
                return Ok(());
            }

            let parent = self.arena.get(parent_id);
            let slot = parent.slot_of(node_id);
            let left = slot.checked_sub(1).map(|s| parent.children()[s]);
            let right = parent.children().get(slot + 1).copied();

            if let Some(left_id) = left {
                if self.arena.get(left_id).page().len() > min_keys {
                    return self.borrow_from_left(parent_id, slot);
                }
            }
            if let Some(right_id) = right {
                if self.arena.get(right_id).page().len() > min_keys {
                    return self.borrow_from_right(parent_id, slot);
                }
            }

            match (left, right) {
                (Some(_), _) => self.merge(parent_id, slot - 1)?,
                (None, Some(_)) => self.merge(parent_id, slot)?,
                (None, None) => {
                    debug_assert!(false, "{} has no siblings", node_id);
                    return Ok(());
                }
            }

            node_id = parent_id;
        }
    }

    /// Move the left sibling's last key (and last child) into the node at
    /// `slot` of `parent_id`.
    fn borrow_from_left(&mut self, parent_id: NodeId, slot: usize) -> Result<()> {
        let parent = self.arena.get(parent_id);
        let left_id = parent.children()[slot - 1];
        let node_id = parent.children()[slot];

        let left = self.arena.get_mut(left_id);
        let last = left.page().len() - 1;
        let key = left.page_mut().remove_at(last)?;
        let moved_child = left.children_mut().pop();

        let separator = match moved_child {
            None => {
                // Leaf: the borrowed key becomes the node's first key and the
                // new lower bound of its range.
                self.arena.get_mut(node_id).page_mut().add(key.clone())?;
                key
            }
            Some(child) => {
                // Internal: rotate through the parent.
                let down = self.arena.get_mut(parent_id).page_mut().remove_at(slot - 1)?;
                let node = self.arena.get_mut(node_id);
                node.page_mut().add(down)?;
                node.children_mut().insert(0, child);
                self.arena.get_mut(child).set_parent(Some(node_id));
                key
            }
        };

        self.replace_separator(parent_id, slot - 1, separator, moved_child.is_none())?;

        self.stats.borrows += 1;
        debug!(node = %node_id, sibling = %left_id, "btree.borrow.left");
        Ok(())
    }

    /// Move the right sibling's first key (and first child) into the node at
    /// `slot` of `parent_id`.
    fn borrow_from_right(&mut self, parent_id: NodeId, slot: usize) -> Result<()> {
        let parent = self.arena.get(parent_id);
        let node_id = parent.children()[slot];
        let right_id = parent.children()[slot + 1];

        let right = self.arena.get_mut(right_id);
        let key = right.page_mut().remove_at(0)?;
        let is_leaf = right.is_leaf();

        if is_leaf {
            // The right sibling's new first key is its new lower bound.
            let separator = right.page().get(0)?.clone();
            self.arena.get_mut(node_id).page_mut().add(key)?;
            self.replace_separator(parent_id, slot, separator, true)?;
        } else {
            let child = right.children_mut().remove(0);
            let down = self.arena.get_mut(parent_id).page_mut().remove_at(slot)?;
            let node = self.arena.get_mut(node_id);
            node.page_mut().add(down)?;
            node.children_mut().push(child);
            self.arena.get_mut(child).set_parent(Some(node_id));
            self.replace_separator(parent_id, slot, key, false)?;
        }

        self.stats.borrows += 1;
        debug!(node = %node_id, sibling = %right_id, "btree.borrow.right");
        Ok(())
    }

    /// Put `separator` at `index` of the parent's page.
    ///
    /// For a leaf borrow the old separator is still there and is dropped
    /// first; an internal rotation already moved it down.
    fn replace_separator(
        &mut self,
        parent_id: NodeId,
        index: usize,
        separator: K,
        drop_old: bool,
    ) -> Result<()> {
        let page = self.arena.get_mut(parent_id).page_mut();
        if drop_old {
            page.remove_at(index)?;
        }
        let placed = page.add(separator)?;
        debug_assert_eq!(placed, index);
        Ok(())
    }

    /// Fold the child at `left_slot + 1` into the child at `left_slot`.
    fn merge(&mut self, parent_id: NodeId, left_slot: usize) -> Result<()> {
        let parent = self.arena.get_mut(parent_id);
        let separator = parent.page_mut().remove_at(left_slot)?;
        let right_id = parent.children_mut().remove(left_slot + 1);
        let left_id = parent.children()[left_slot];

        let right = self.arena.get_mut(right_id);
        let right_page = std::mem::take(right.page_mut());
        let right_children = std::mem::take(right.children_mut());
        self.arena.release(right_id);

        let left = self.arena.get_mut(left_id);
        if !left.is_leaf() {
            // Pull the separator down between the two key runs.
            left.page_mut().add(separator)?;
        }
        for key in right_page {
            left.page_mut().add(key)?;
        }
        left.children_mut().extend_from_slice(&right_children);
        for child in right_children {
            self.arena.get_mut(child).set_parent(Some(left_id));
        }

        self.stats.merges += 1;
        debug!(left = %left_id, right = %right_id, "btree.merge");
        Ok(())
    }

    /// Drop an empty root leaf, or collapse an internal root with no keys.
    fn shrink_root(&mut self, root_id: NodeId) {
        let root = self.arena.get(root_id);
        if !root.page().is_empty() {
            return;
        }

        match root.children().first().copied() {
            None => {
                self.arena.release(root_id);
                self.root = None;
                debug!(root = %root_id, "btree.root.empty");
            }
            Some(child) => {
                debug_assert_eq!(root.children().len(), 1);
                self.arena.release(root_id);
                self.arena.get_mut(child).set_parent(None);
                self.root = Some(child);
                self.stats.root_collapses += 1;
                debug!(old = %root_id, new = %child, "btree.root.collapse");
            }
        }
    }
}
