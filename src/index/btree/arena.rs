//! Node arena - owns every node of a tree.
//!
//! Nodes never own each other. The arena owns all of them and parent/child
//! links are plain [`NodeId`]s, so a split or merge can re-point several
//! nodes at once without any lifetime juggling.

use crate::common::NodeId;

use super::node::Node;

/// Slab of nodes addressed by [`NodeId`].
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────┐
/// │                  NodeArena                    │
/// │  ┌─────────────────────────────────────────┐  │
/// │  │   nodes: Vec<Node>                      │  │
/// │  │   [Node0] [Node1] [Node2] [Node3] ...   │  │
/// │  └─────────────────────────────────────────┘  │
/// │  ┌──────────────┐                             │
/// │  │  free_list   │  released slots, reused     │
/// │  │ Vec<NodeId>  │  LIFO                       │
/// │  └──────────────┘                             │
/// └───────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<K, const ORDER: usize> {
    /// Every slot ever allocated. Released slots are reset leaves.
    nodes: Vec<Node<K, ORDER>>,

    /// Stack of released slots (LIFO for locality).
    free_list: Vec<NodeId>,
}

impl<K, const ORDER: usize> NodeArena<K, ORDER> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store `node` and return its id, reusing a released slot if any.
    pub(crate) fn allocate(&mut self, node: Node<K, ORDER>) -> NodeId {
        if let Some(node_id) = self.free_list.pop() {
            self.nodes[node_id.0] = node;
            return node_id;
        }

        let node_id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        node_id
    }

    /// Return a slot to the free list.
    ///
    /// The caller must already have unlinked it from its parent and children.
    pub(crate) fn release(&mut self, node_id: NodeId) {
        debug_assert!(!self.free_list.contains(&node_id), "double release");
        self.nodes[node_id.0].reset();
        self.free_list.push(node_id);
    }

    #[inline]
    pub(crate) fn get(&self, node_id: NodeId) -> &Node<K, ORDER> {
        &self.nodes[node_id.0]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> &mut Node<K, ORDER> {
        &mut self.nodes[node_id.0]
    }

    /// Like [`NodeArena::get`], but `None` for unknown or released slots.
    pub(crate) fn get_checked(&self, node_id: NodeId) -> Option<&Node<K, ORDER>> {
        if self.free_list.contains(&node_id) {
            return None;
        }
        self.nodes.get(node_id.0)
    }

    /// Number of nodes currently in use.
    pub(crate) fn live_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Drop every node, including released slots.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }
}

impl<K, const ORDER: usize> Default for NodeArena<K, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}
