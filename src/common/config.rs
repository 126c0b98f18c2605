//! Configuration constants for pagetree.
//!
//! Tree shape is fixed at compile time through the `ORDER` const parameter
//! of [`BPlusTree`](crate::BPlusTree). These constants document the bounds
//! and the default used throughout the tests and benchmarks.

/// Fan-out used when a caller has no reason to pick another one.
///
/// Four children per internal node (three keys per page) keeps trees small
/// enough to reason about by hand while still exercising multi-level splits.
pub const DEFAULT_ORDER: usize = 4;

/// Smallest supported fan-out.
///
/// With a fan-out of 2, an internal split consumes the only separator the
/// right half would get, leaving an internal node with no keys to search.
pub const MIN_ORDER: usize = 3;

/// Minimum number of keys a non-root leaf may hold for a given fan-out.
///
/// `ceil((order - 1) / 2)`: a leaf split of `order` staged keys at
/// `order / 2` never produces a half below this.
#[inline]
pub const fn min_leaf_keys(order: usize) -> usize {
    order / 2
}

/// Minimum number of keys a non-root internal node may hold.
///
/// `ceil(order / 2) - 1`, i.e. at least `ceil(order / 2)` children.
#[inline]
pub const fn min_internal_keys(order: usize) -> usize {
    order.div_ceil(2) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_supported() {
        assert!(DEFAULT_ORDER >= MIN_ORDER);
    }

    #[test]
    fn test_min_leaf_keys() {
        // ceil((order - 1) / 2)
        assert_eq!(min_leaf_keys(3), 1);
        assert_eq!(min_leaf_keys(4), 2);
        assert_eq!(min_leaf_keys(5), 2);
        assert_eq!(min_leaf_keys(6), 3);
    }

    #[test]
    fn test_min_internal_keys() {
        assert_eq!(min_internal_keys(3), 1);
        assert_eq!(min_internal_keys(4), 1);
        assert_eq!(min_internal_keys(5), 2);
        assert_eq!(min_internal_keys(6), 2);
    }

    #[test]
    fn test_split_halves_meet_minimums() {
        for order in MIN_ORDER..64 {
            let middle = order / 2;
            // Leaf split keeps the middle key on the right.
            assert!(middle >= min_leaf_keys(order));
            assert!(order - middle >= min_leaf_keys(order));
            // Internal split consumes the middle key.
            assert!(middle >= min_internal_keys(order));
            assert!(order - middle - 1 >= min_internal_keys(order));
        }
    }
}
