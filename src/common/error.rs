//! Error types for pagetree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagetree.
///
/// Every failure is raised synchronously to the immediate caller and aborts
/// the operation that produced it. None of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Attempted to insert a key that is already present.
    #[error("Duplicate key")]
    DuplicateKey,

    /// Lookup or removal of a key that is not present.
    #[error("Key not found")]
    KeyNotFound,

    /// Insertion into a page that already holds `capacity` keys.
    ///
    /// Tree insertion never surfaces this: nodes split before it can happen.
    #[error("Buffer full (capacity {capacity})")]
    BufferFull { capacity: usize },

    /// Search or removal on a page holding zero keys.
    #[error("Buffer empty")]
    BufferEmpty,

    /// Positional access beyond the in-use range of a page.
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Copying a page into a page too small to hold its keys.
    #[error("Cannot copy {len} keys into a page of capacity {capacity}")]
    InvalidPageCopy { len: usize, capacity: usize },

    /// Removal from a tree that holds no keys.
    #[error("Tree is empty")]
    EmptyTree,
}
