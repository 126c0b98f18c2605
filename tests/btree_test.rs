//! B+Tree integration tests.
//!
//! These drive the public API only and check the tree's invariants with
//! `validate()` after every mutation.

use pagetree::{BPlusTree, Error, DEFAULT_ORDER};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness. Set `RUST_LOG=debug` to see
/// splits and merges.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic permutation of `0..n` (n must be coprime with 7919).
fn scrambled(n: u32) -> Vec<u32> {
    (0..n).map(|i| (i * 7919) % n).collect()
}

// ============================================================================
// Insertion: sequential keys, fan-out 4
// ============================================================================

/// Insert 1..N one at a time; after each insertion the tree stays balanced
/// and sorted, every inserted key is found and no other key is.
#[test]
fn test_sequential_inserts_fanout_4() {
    init_logging();
    const N: u32 = 300;
    let mut tree: BPlusTree<u32, DEFAULT_ORDER> = BPlusTree::new();

    for n in 1..=N {
        assert!(tree.add(n).unwrap());
        assert_eq!(tree.validate(), Ok(()), "after inserting {}", n);

        for key in 1..=n {
            assert_eq!(tree.find(&key), Ok(&key));
        }
        assert_eq!(tree.find(&0), Err(Error::KeyNotFound));
        assert_eq!(tree.find(&(n + 1)), Err(Error::KeyNotFound));
    }

    assert_eq!(tree.len(), N as usize);
    assert_eq!(tree.keys(), (1..=N).collect::<Vec<_>>());
}

#[test]
fn test_height_grows_logarithmically() {
    let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
    for key in 0..10_000 {
        tree.add(key).unwrap();
    }
    // Every non-root node has at least 2 children, every leaf 2 keys.
    assert!(tree.height() <= 14, "height {}", tree.height());
    assert!(tree.height() >= 7, "height {}", tree.height());
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn test_scrambled_inserts() {
    let keys = scrambled(2000);
    let mut tree: BPlusTree<u32, 7> = BPlusTree::new();
    for &key in &keys {
        assert!(tree.add(key).unwrap());
    }

    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.keys(), (0..2000).collect::<Vec<_>>());
    assert!(tree.stats().internal_splits > 0);
}

// ============================================================================
// Duplicates
// ============================================================================

#[test]
fn test_duplicate_insert_returns_false() {
    let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
    for key in scrambled(100) {
        tree.add(key).unwrap();
    }
    let before = tree.keys();

    for key in 0..100 {
        assert_eq!(tree.add(key), Ok(false));
    }

    assert_eq!(tree.keys(), before);
    assert_eq!(tree.len(), 100);
    assert_eq!(tree.validate(), Ok(()));
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_everything_in_insert_order() {
    let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
    for key in 0..500 {
        tree.add(key).unwrap();
    }

    for key in 0..500 {
        assert_eq!(tree.rmv(&key), Ok(key));
        assert_eq!(tree.validate(), Ok(()), "after removing {}", key);
        assert!(!tree.contains(&key));
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.rmv(&0), Err(Error::EmptyTree));
}

#[test]
fn test_remove_scrambled_half() {
    let mut tree: BPlusTree<u32, 5> = BPlusTree::new();
    for key in scrambled(1000) {
        tree.add(key).unwrap();
    }

    for key in scrambled(1000).into_iter().filter(|k| k % 2 == 1) {
        tree.rmv(&key).unwrap();
    }
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.keys(), (0..1000).step_by(2).collect::<Vec<_>>());

    for key in (1..1000).step_by(2) {
        assert_eq!(tree.rmv(&key), Err(Error::KeyNotFound));
    }
    assert_eq!(tree.len(), 500);
}

#[test]
fn test_remove_then_reinsert() {
    let mut tree: BPlusTree<u32, 3> = BPlusTree::new();
    for key in 0..200 {
        tree.add(key).unwrap();
    }
    for key in (0..200).rev().step_by(3) {
        tree.rmv(&key).unwrap();
    }
    for key in (0..200).rev().step_by(3) {
        assert!(tree.add(key).unwrap());
    }

    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.keys(), (0..200).collect::<Vec<_>>());
}

#[test]
fn test_height_shrinks_back() {
    let mut tree: BPlusTree<u32, 4> = BPlusTree::new();
    for key in 0..1000 {
        tree.add(key).unwrap();
    }
    let tall = tree.height();

    for key in 10..1000 {
        tree.rmv(&key).unwrap();
    }

    assert!(tree.height() < tall);
    assert!(tree.stats().root_collapses > 0);
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.keys(), (0..10).collect::<Vec<_>>());
}

// ============================================================================
// Key types
// ============================================================================

#[test]
fn test_string_keys() {
    let words = [
        "pear", "apple", "fig", "kiwi", "plum", "cherry", "date", "lime", "mango", "grape",
        "lemon", "melon", "peach", "quince",
    ];

    let mut tree: BPlusTree<String, 4> = BPlusTree::new();
    for word in words {
        assert!(tree.add(word.to_string()).unwrap());
    }
    assert!(!tree.add("fig".to_string()).unwrap());

    let mut sorted: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    sorted.sort();
    assert_eq!(tree.keys(), sorted);

    assert_eq!(tree.find(&"kiwi".to_string()).map(String::as_str), Ok("kiwi"));
    assert_eq!(tree.rmv(&"kiwi".to_string()), Ok("kiwi".to_string()));
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn test_large_order() {
    let mut tree: BPlusTree<u64, 64> = BPlusTree::new();
    for key in 0..20_000u64 {
        tree.add(key * 3).unwrap();
    }
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.validate(), Ok(()));

    for key in 0..20_000u64 {
        assert!(tree.contains(&(key * 3)));
        assert!(!tree.contains(&(key * 3 + 1)));
    }
}
