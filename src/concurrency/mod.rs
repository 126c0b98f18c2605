//! Shared access to a tree.
//!
//! The tree itself is single-threaded. [`SharedTree`] serializes access
//! with one reader-writer lock around the whole tree.

mod shared_tree;

pub use shared_tree::SharedTree;
