//! Page - a fixed-capacity, always-sorted buffer of unique keys.
//!
//! A [`Page`] is the storage unit inside one tree node. It knows nothing
//! about trees: it only keeps its keys sorted, rejects duplicates, and can
//! split itself in two around a middle key.

use std::fmt;
use std::ops::Index;

use crate::common::{Error, Result};

/// Outcome of a binary search over a page.
///
/// - `found == true`: `index` is the position of the exact match.
/// - `found == false`: `index` is the insertion point that keeps the page
///   sorted, i.e. the number of keys strictly less than the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub index: usize,
    pub found: bool,
}

/// A sorted buffer holding at most `CAP` unique keys.
///
/// # Invariants
/// - Keys are strictly increasing across the in-use prefix.
/// - `len() <= CAP` at all times.
///
/// # Example
/// ```
/// use pagetree::Page;
///
/// let mut page: Page<i32, 8> = Page::new();
/// for key in [3, 2, 9, 1, 5] {
///     page.add(key).unwrap();
/// }
/// assert_eq!(page.as_slice(), &[1, 2, 3, 5, 9]);
///
/// let hit = page.find(&5).unwrap();
/// assert!(hit.found);
/// assert_eq!(hit.index, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<K, const CAP: usize> {
    keys: Vec<K>,
}

impl<K, const CAP: usize> Page<K, CAP> {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self {
            keys: Vec::with_capacity(CAP),
        }
    }

    /// Wrap keys that are already sorted and unique.
    fn from_sorted(mut keys: Vec<K>) -> Self {
        debug_assert!(keys.len() <= CAP);
        keys.reserve(CAP.saturating_sub(keys.len()));
        Self { keys }
    }

    /// Maximum number of keys this page can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Number of keys currently in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.keys.len() == CAP
    }

    /// Forget every key. Capacity is kept.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// The in-use keys, in increasing order.
    #[inline]
    pub fn as_slice(&self) -> &[K] {
        &self.keys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub fn first(&self) -> Option<&K> {
        self.keys.first()
    }

    pub fn last(&self) -> Option<&K> {
        self.keys.last()
    }

    /// Positional access.
    ///
    /// # Errors
    /// - `Error::IndexOutOfBounds` if `index >= len()`
    pub fn get(&self, index: usize) -> Result<&K> {
        self.keys.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.keys.len(),
        })
    }
}

impl<K: Ord, const CAP: usize> Page<K, CAP> {
    /// Binary search over the in-use prefix.
    ///
    /// # Errors
    /// - `Error::BufferEmpty` if the page holds no keys
    pub fn find(&self, key: &K) -> Result<SearchResult> {
        if self.keys.is_empty() {
            return Err(Error::BufferEmpty);
        }

        Ok(match self.keys.binary_search(key) {
            Ok(index) => SearchResult { index, found: true },
            Err(index) => SearchResult {
                index,
                found: false,
            },
        })
    }

    /// Insert `key` at its sorted position and return that position.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present
    /// - `Error::BufferFull` if the page already holds `CAP` keys
    pub fn add(&mut self, key: K) -> Result<usize> {
        let index = match self.keys.binary_search(&key) {
            Ok(_) => return Err(Error::DuplicateKey),
            Err(index) => index,
        };

        if self.is_full() {
            return Err(Error::BufferFull { capacity: CAP });
        }

        self.keys.insert(index, key);
        Ok(index)
    }

    /// Remove `key` and return the position it occupied.
    ///
    /// # Errors
    /// - `Error::BufferEmpty` if the page holds no keys
    /// - `Error::KeyNotFound` if `key` is not present
    pub fn rmv(&mut self, key: &K) -> Result<usize> {
        let search = self.find(key)?;
        if !search.found {
            return Err(Error::KeyNotFound);
        }

        self.keys.remove(search.index);
        Ok(search.index)
    }
}

impl<K, const CAP: usize> Page<K, CAP> {
    /// Remove and return the key at `index`.
    ///
    /// Removing by position cannot break ordering, so this is safe to expose
    /// next to the key-based [`Page::rmv`].
    ///
    /// # Errors
    /// - `Error::IndexOutOfBounds` if `index >= len()`
    pub fn remove_at(&mut self, index: usize) -> Result<K> {
        if index >= self.keys.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.keys.len(),
            });
        }
        Ok(self.keys.remove(index))
    }
}

impl<K: Clone, const CAP: usize> Page<K, CAP> {
    /// Split this page around `middle = CAP / 2`.
    ///
    /// Returns `(left, right, middle_key)`:
    /// - `left` holds indices `[0, middle)`
    /// - `right` holds `[middle + 1, len)` when `consume_middle`, otherwise
    ///   `[middle, len)`
    /// - `middle_key` is always the key at `middle`
    ///
    /// The split point depends on the declared capacity, not on `len()`.
    /// On success this page is left empty; its owner is expected to drop
    /// or reuse it.
    ///
    /// # Errors
    /// - `Error::IndexOutOfBounds` if the page holds `middle` keys or fewer,
    ///   in which case the page is left untouched
    pub fn split(&mut self, consume_middle: bool) -> Result<(Self, Self, K)> {
        let middle = CAP / 2;
        self.get(middle)?;

        let mut right = self.keys.split_off(middle);
        let left = std::mem::take(&mut self.keys);

        let middle_key = if consume_middle {
            right.remove(0)
        } else {
            right[0].clone()
        };

        Ok((Self::from_sorted(left), Self::from_sorted(right), middle_key))
    }

    /// Copy the in-use keys of a page with a different capacity.
    ///
    /// # Errors
    /// - `Error::InvalidPageCopy` if `other` holds more than `CAP` keys
    pub fn from_page<const OTHER: usize>(other: &Page<K, OTHER>) -> Result<Self> {
        if other.len() > CAP {
            return Err(Error::InvalidPageCopy {
                len: other.len(),
                capacity: CAP,
            });
        }

        Ok(Self::from_sorted(other.keys.clone()))
    }
}

impl<K, const CAP: usize> Default for Page<K, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, const CAP: usize> Index<usize> for Page<K, CAP> {
    type Output = K;

    /// # Panics
    /// Panics if `index >= len()`. Use [`Page::get`] for a checked lookup.
    fn index(&self, index: usize) -> &K {
        &self.keys[index]
    }
}

impl<'a, K, const CAP: usize> IntoIterator for &'a Page<K, CAP> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl<K, const CAP: usize> IntoIterator for Page<K, CAP> {
    type Item = K;
    type IntoIter = std::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<K: fmt::Display, const CAP: usize> fmt::Display for Page<K, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
