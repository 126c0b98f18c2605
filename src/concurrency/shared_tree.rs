//! SharedTree - one lock around a whole [`BPlusTree`].

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

use crate::common::Result;
use crate::index::btree::BPlusTree;

/// A [`BPlusTree`] behind a single `RwLock`.
///
/// Splits and merges re-point links across several nodes, so the tree has
/// no finer-grained locking to offer. Lookups share the lock; `add` and
/// `rmv` take it exclusively for their whole duration.
///
/// # Thread Safety
/// - `tree`: `RwLock`, many readers or one writer
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use pagetree::SharedTree;
///
/// let tree: Arc<SharedTree<u32, 4>> = Arc::new(SharedTree::new());
/// let handles: Vec<_> = (0..4u32)
///     .map(|t| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 tree.add(t * 100 + i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
pub struct SharedTree<K, const ORDER: usize> {
    tree: RwLock<BPlusTree<K, ORDER>>,
}

impl<K, const ORDER: usize> SharedTree<K, ORDER> {
    /// Create an empty shared tree.
    pub fn new() -> Self {
        Self::from_tree(BPlusTree::new())
    }

    /// Share an existing tree.
    pub fn from_tree(tree: BPlusTree<K, ORDER>) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Hold the shared lock for several reads in a row.
    pub fn read(&self) -> RwLockReadGuard<'_, BPlusTree<K, ORDER>> {
        self.tree.read()
    }

    /// Hold the exclusive lock for several mutations in a row.
    pub fn write(&self) -> RwLockWriteGuard<'_, BPlusTree<K, ORDER>> {
        self.tree.write()
    }

    /// Take the tree back out.
    pub fn into_inner(self) -> BPlusTree<K, ORDER> {
        self.tree.into_inner()
    }
}

impl<K: Ord + Clone, const ORDER: usize> SharedTree<K, ORDER> {
    /// Insert under the exclusive lock. See [`BPlusTree::add`].
    pub fn add(&self, key: K) -> Result<bool> {
        let mut tree = self.tree.write();
        let inserted = tree.add(key)?;
        trace!(inserted, len = tree.len(), "shared_tree.add");
        Ok(inserted)
    }

    /// Remove under the exclusive lock. See [`BPlusTree::rmv`].
    pub fn rmv(&self, key: &K) -> Result<K> {
        self.tree.write().rmv(key)
    }

    /// Look up under the shared lock.
    ///
    /// Returns a copy of the stored key since the lock is released on return.
    pub fn find(&self, key: &K) -> Result<K> {
        self.tree.read().find(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.read().contains(key)
    }
}

impl<K, const ORDER: usize> Default for SharedTree<K, ORDER> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_tree_basic() {
        let tree: SharedTree<u32, 4> = SharedTree::new();
        assert!(tree.is_empty());

        assert!(tree.add(3).unwrap());
        assert!(tree.add(1).unwrap());
        assert!(!tree.add(3).unwrap());

        assert_eq!(tree.find(&1), Ok(1));
        assert_eq!(tree.find(&2), Err(Error::KeyNotFound));
        assert_eq!(tree.rmv(&1), Ok(1));
        assert!(!tree.contains(&1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_shared_tree_guards() {
        let tree: SharedTree<u32, 4> = SharedTree::new();
        {
            let mut guard = tree.write();
            for key in 0..20 {
                guard.add(key).unwrap();
            }
        }
        let guard = tree.read();
        assert_eq!(guard.len(), 20);
        assert!(guard.validate().is_ok());
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let tree: Arc<SharedTree<u32, 5>> = Arc::new(SharedTree::new());

        let writers: Vec<_> = (0..4u32)
            .map(|t| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || {
                    for i in 0..250 {
                        assert!(tree.add(i * 4 + t).unwrap());
                    }
                })
            })
            .collect();

        let reader = {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for _ in 0..100 {
                    let guard = tree.read();
                    assert!(guard.validate().is_ok());
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        let tree = Arc::try_unwrap(tree).ok().unwrap().into_inner();
        assert_eq!(tree.len(), 1000);
        assert_eq!(tree.keys(), (0..1000).collect::<Vec<_>>());
    }
}
