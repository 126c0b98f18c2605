//! Model-based property tests: a `BPlusTree` must behave like a `BTreeSet`.

use std::collections::BTreeSet;

use pagetree::{BPlusTree, Error};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u16),
    Rmv(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..400).prop_map(Op::Add),
        2 => (0u16..400).prop_map(Op::Rmv),
    ]
}

fn run<const ORDER: usize>(ops: &[Op]) -> std::result::Result<(), TestCaseError> {
    let mut tree: BPlusTree<u16, ORDER> = BPlusTree::new();
    let mut model = BTreeSet::new();

    for op in ops {
        match *op {
            Op::Add(key) => {
                prop_assert_eq!(tree.add(key), Ok(model.insert(key)));
            }
            Op::Rmv(key) => {
                let expected = if model.is_empty() {
                    Err(Error::EmptyTree)
                } else if model.remove(&key) {
                    Ok(key)
                } else {
                    Err(Error::KeyNotFound)
                };
                prop_assert_eq!(tree.rmv(&key), expected);
            }
        }
        prop_assert_eq!(tree.validate(), Ok(()));
        prop_assert_eq!(tree.len(), model.len());
    }

    prop_assert_eq!(tree.keys(), model.iter().copied().collect::<Vec<_>>());
    for key in 0..400u16 {
        prop_assert_eq!(tree.contains(&key), model.contains(&key));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matches_model_order_3(ops in prop::collection::vec(op(), 0..600)) {
        run::<3>(&ops)?;
    }

    #[test]
    fn prop_matches_model_order_4(ops in prop::collection::vec(op(), 0..600)) {
        run::<4>(&ops)?;
    }

    #[test]
    fn prop_matches_model_order_5(ops in prop::collection::vec(op(), 0..600)) {
        run::<5>(&ops)?;
    }

    #[test]
    fn prop_matches_model_order_8(ops in prop::collection::vec(op(), 0..600)) {
        run::<8>(&ops)?;
    }
}
