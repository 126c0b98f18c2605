//! Index structures.
//!
//! - [`btree`] - In-memory B+Tree over fixed-capacity pages

pub mod btree;

pub use btree::{BPlusTree, Node, TreeStats};
