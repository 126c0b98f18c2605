//! pagetree - an in-memory B+Tree index built from fixed-capacity pages.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagetree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Shared Access (concurrency/)                   │   │
//! │  │        SharedTree: one RwLock around the tree            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BPlusTree: lookup, split-and-promote, borrow/merge     │   │
//! │  │   Node + NodeArena (NodeId links, no owning pointers)    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Storage Layer (storage/page/)               │   │
//! │  │   Page<K, CAP>: sorted, unique, binary search, split     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`storage`] - Sorted key pages
//! - [`index`] - The B+Tree
//! - [`concurrency`] - Lock wrapper for sharing a tree across threads
//!
//! # Quick Start
//! ```
//! use pagetree::BPlusTree;
//!
//! let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
//! for key in 1..=100 {
//!     tree.add(key).unwrap();
//! }
//!
//! assert_eq!(tree.find(&42), Ok(&42));
//! assert_eq!(tree.rmv(&42), Ok(42));
//! assert!(!tree.contains(&42));
//! assert!(tree.validate().is_ok());
//! ```

pub mod common;
pub mod concurrency;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, NodeId, Result};

pub use concurrency::SharedTree;
pub use index::btree::{BPlusTree, Node, TreeStats};
pub use storage::page::{Page, SearchResult};
