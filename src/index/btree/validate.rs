//! Structural validation.
//!
//! Walks the whole tree and checks every invariant the algorithms rely on.
//! Used by the tests after each mutation; cheap enough for debugging a
//! production tree, but linear in its size.

use crate::common::config::{min_internal_keys, min_leaf_keys};
use crate::common::NodeId;

use super::tree::BPlusTree;

/// Bounds a subtree's keys must respect: `lower <= key < upper`.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K: Ord + Clone, const ORDER: usize> BPlusTree<K, ORDER> {
    /// Check every structural invariant.
    ///
    /// - the root has no parent; non-root nodes are linked to their parent
    /// - each page is strictly increasing and holds at most `ORDER - 1` keys
    /// - non-root nodes hold at least the minimum number of keys
    /// - internal nodes own exactly `keys + 1` children
    /// - every key lies within the range its ancestors' separators assign
    /// - all leaves are at the same depth
    /// - the leaf key count matches `len()` and every live node is reachable
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        let root = match self.root {
            Some(root) => root,
            None => {
                if self.len != 0 {
                    return Err(format!("empty tree reports len {}", self.len));
                }
                return Ok(());
            }
        };

        if let Some(parent) = self.arena.get(root).parent() {
            return Err(format!("root {} has parent {}", root, parent));
        }

        let mut walk = Walk {
            leaf_depth: None,
            keys: 0,
            nodes: 0,
        };
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        self.validate_node(root, 1, bounds, &mut walk)?;

        if walk.keys != self.len {
            return Err(format!("leaves hold {} keys, len is {}", walk.keys, self.len));
        }
        if walk.nodes != self.arena.live_count() {
            return Err(format!(
                "{} nodes reachable, {} allocated",
                walk.nodes,
                self.arena.live_count()
            ));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        node_id: NodeId,
        depth: usize,
        bounds: Bounds<'_, K>,
        walk: &mut Walk,
    ) -> Result<(), String> {
        walk.nodes += 1;

        let node = self.arena.get(node_id);
        let keys = node.page().as_slice();
        let is_root = Some(node_id) == self.root;

        if keys.len() > ORDER - 1 {
            return Err(format!("{} holds {} keys, max {}", node_id, keys.len(), ORDER - 1));
        }
        if keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!("{} keys are not strictly increasing", node_id));
        }
        if let (Some(lower), Some(first)) = (bounds.lower, keys.first()) {
            if first < lower {
                return Err(format!("{} has a key below its lower bound", node_id));
            }
        }
        if let (Some(upper), Some(last)) = (bounds.upper, keys.last()) {
            if last >= upper {
                return Err(format!("{} has a key at or above its upper bound", node_id));
            }
        }

        if node.is_leaf() {
            let min = if is_root { 1 } else { min_leaf_keys(ORDER) };
            if keys.len() < min {
                return Err(format!("leaf {} holds {} keys, min {}", node_id, keys.len(), min));
            }
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(format!(
                        "leaf {} at depth {}, expected {}",
                        node_id, depth, expected
                    ));
                }
                Some(_) => {}
            }
            walk.keys += keys.len();
            return Ok(());
        }

        let min = if is_root { 1 } else { min_internal_keys(ORDER) };
        if keys.len() < min {
            return Err(format!(
                "internal {} holds {} keys, min {}",
                node_id,
                keys.len(),
                min
            ));
        }
        let children = node.children();
        if children.len() != keys.len() + 1 {
            return Err(format!(
                "internal {} has {} keys but {} children",
                node_id,
                keys.len(),
                children.len()
            ));
        }

        for (slot, &child) in children.iter().enumerate() {
            let child_parent = self.arena.get(child).parent();
            if child_parent != Some(node_id) {
                return Err(format!(
                    "{} is a child of {} but points at {:?}",
                    child, node_id, child_parent
                ));
            }

            let child_bounds = Bounds {
                lower: if slot == 0 { bounds.lower } else { Some(&keys[slot - 1]) },
                upper: if slot == keys.len() { bounds.upper } else { Some(&keys[slot]) },
            };
            self.validate_node(child, depth + 1, child_bounds, walk)?;
        }
        Ok(())
    }
}

/// Totals gathered during one validation walk.
struct Walk {
    leaf_depth: Option<usize>,
    keys: usize,
    nodes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        let tree: BPlusTree<u32, 4> = BPlusTree::new();
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_grown_tree() {
        let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
        for key in 0..1000 {
            tree.add((key * 37) % 1000).unwrap();
            if key % 97 == 0 {
                assert_eq!(tree.validate(), Ok(()));
            }
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_validate_detects_bad_len() {
        let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
        tree.add(1).unwrap();
        tree.len = 3;
        assert!(tree.validate().unwrap_err().contains("len is 3"));
    }

    #[test]
    fn test_validate_detects_broken_parent_link() {
        let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
        for key in 0..8 {
            tree.add(key).unwrap();
        }
        let root = tree.root_id().unwrap();
        let child = tree.node(root).unwrap().children()[1];
        tree.arena.get_mut(child).set_parent(None);

        assert!(tree.validate().unwrap_err().contains("is a child of"));
    }

    #[test]
    fn test_validate_detects_out_of_range_key() {
        let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
        for key in [10, 20, 30, 40] {
            tree.add(key).unwrap();
        }
        // Right leaf covers [30, inf); 25 does not belong there.
        let root = tree.root_id().unwrap();
        let right = tree.node(root).unwrap().children()[1];
        tree.arena.get_mut(right).page_mut().add(25).unwrap();
        tree.len += 1;

        assert!(tree.validate().unwrap_err().contains("lower bound"));
    }
}
