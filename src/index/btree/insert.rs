//! Insertion with split-and-promote.
//!
//! A key always goes into its leaf first. A node's page has one slot of
//! headroom, so a full leaf simply becomes *overflowing*; the overflow is
//! then pushed upward:
//!
//! ```text
//!   1. split the overflowing node around middle = ORDER / 2
//!   2. the left half stays in the node's slot, the right half gets a new slot
//!   3. promote the middle key into the parent, right half after the left
//!   4. parent overflowing? repeat from 1 one level up
//!   5. no parent? create a new root over the two halves
//! ```

use tracing::debug;

use crate::common::{NodeId, Result};
use crate::storage::page::Page;

use super::node::Node;
use super::tree::BPlusTree;

impl<K: Ord + Clone, const ORDER: usize> BPlusTree<K, ORDER> {
    // ========================================================================
    // Public API: Insertion
    // ========================================================================

    /// Insert `key`.
    ///
    /// Returns `Ok(false)` and leaves the tree untouched if the key is
    /// already present, `Ok(true)` once it has been inserted. Existence is
    /// resolved before any node is modified.
    ///
    /// # Errors
    /// Only if the tree's structure is already corrupt; a well-formed tree
    /// never fails here.
    pub fn add(&mut self, key: K) -> Result<bool> {
        let root = match self.root {
            Some(root) => root,
            None => {
                self.plant_root(key)?;
                return Ok(true);
            }
        };

        let (leaf, search) = self.descend(root, &key)?;
        if search.found {
            return Ok(false);
        }

        self.arena.get_mut(leaf).page_mut().add(key)?;
        self.len += 1;

        self.split_overflowing(leaf)?;
        Ok(true)
    }

    // ========================================================================
    // Internal: Split-and-promote
    // ========================================================================

    /// First key of an empty tree: a lone root leaf.
    fn plant_root(&mut self, key: K) -> Result<()> {
        let mut page = Page::new();
        page.add(key)?;

        let root = self.arena.allocate(Node::leaf(page, None));
        self.root = Some(root);
        self.len = 1;

        debug!(root = %root, "btree.root.plant");
        Ok(())
    }

    /// Split `node_id` and its ancestors until none of them overflows.
    fn split_overflowing(&mut self, mut node_id: NodeId) -> Result<()> {
        while self.arena.get(node_id).is_overflowing() {
            let (right_id, promoted) = self.split_node(node_id)?;

            let parent_id = match self.arena.get(node_id).parent() {
                Some(parent_id) => parent_id,
                None => {
                    self.grow_root(node_id, right_id, promoted)?;
                    return Ok(());
                }
            };

            // The promoted key lands right after the separator bounding the
            // left half from below, so its index is the left half's slot.
            let parent = self.arena.get_mut(parent_id);
            let index = parent.page_mut().add(promoted)?;
            debug_assert_eq!(parent.children()[index], node_id);
            parent.children_mut().insert(index + 1, right_id);

            node_id = parent_id;
        }
        Ok(())
    }

    /// Split an overflowing node in two.
    ///
    /// The node keeps the left half in place; the right half is allocated
    /// with the same parent. Returns the right half's id and the key to
    /// promote.
    ///
    /// Leaves keep the middle key as the right half's first key (it is an
    /// indexed key). Internal nodes hand the middle separator up and keep it
    /// in neither half; children `[0, middle]` stay, the rest move right.
    fn split_node(&mut self, node_id: NodeId) -> Result<(NodeId, K)> {
        let node = self.arena.get_mut(node_id);
        let is_leaf = node.is_leaf();
        let parent = node.parent();

        let (left_page, right_page, promoted) = node.page_mut().split(!is_leaf)?;
        *node.page_mut() = left_page;

        let right_id = if is_leaf {
            self.arena.allocate(Node::leaf(right_page, parent))
        } else {
            let middle = ORDER / 2;
            let moved = node.children_mut().split_off(middle + 1);
            let right_id = self
                .arena
                .allocate(Node::internal(right_page, moved.clone(), parent));
            for child in moved {
                self.arena.get_mut(child).set_parent(Some(right_id));
            }
            right_id
        };

        if is_leaf {
            self.stats.leaf_splits += 1;
            debug!(left = %node_id, right = %right_id, "btree.split.leaf");
        } else {
            self.stats.internal_splits += 1;
            debug!(left = %node_id, right = %right_id, "btree.split.internal");
        }

        Ok((right_id, promoted))
    }

    /// The old root split: put a new root with one separator above it.
    fn grow_root(&mut self, left_id: NodeId, right_id: NodeId, separator: K) -> Result<()> {
        let mut page = Page::new();
        page.add(separator)?;

        let root = self
            .arena
            .allocate(Node::internal(page, vec![left_id, right_id], None));
        self.arena.get_mut(left_id).set_parent(Some(root));
        self.arena.get_mut(right_id).set_parent(Some(root));
        self.root = Some(root);

        self.stats.root_splits += 1;
        debug!(root = %root, height = self.height(), "btree.root.grow");
        Ok(())
    }
}
