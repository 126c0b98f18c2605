//! B+Tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - Lookup, insertion and removal over a node arena
//! - [`Node`] - One vertex: a page of keys, child slots, a parent link
//! - [`TreeStats`] - Split/borrow/merge counters
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]; no node
//! owns another.
//!
//! [`NodeId`]: crate::common::NodeId

mod arena;
mod insert;
mod node;
mod remove;
mod stats;
mod tree;
mod validate;

pub use node::Node;
pub use stats::TreeStats;
pub use tree::BPlusTree;
