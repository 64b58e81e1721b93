//! Property-based tests for the tree, differential against
//! `std::collections::BTreeMap` as an oracle.

use std::collections::BTreeMap;

use bptree::BPlusTree;
use proptest::prelude::*;

/// Operations for random testing.
#[derive(Debug, Clone)]
enum Op {
    Insert(u16, u64),
    Get(u16),
}

/// Strategy for generating random operation sequences. Narrow key space so
/// updates and hits actually happen.
fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u16..512, any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
            1 => (0u16..512).prop_map(Op::Get),
        ],
        0..=max_ops,
    )
}

/// Strategy for orders small enough to force frequent splits.
fn small_order() -> impl Strategy<Value = usize> {
    3usize..=8
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every inserted key is retrievable afterward, splits or not.
    #[test]
    fn insert_then_get_returns_value(order in small_order(), key: u16, value: u64) {
        let mut tree = BPlusTree::new(order);
        tree.insert(key, value);
        prop_assert_eq!(tree.get(&key), Some(&value));
    }

    /// Inserting a duplicate key returns the old value and keeps one entry.
    #[test]
    fn insert_duplicate_returns_old_value(key: u16, v1: u64, v2: u64) {
        let mut tree = BPlusTree::new(4);
        prop_assert_eq!(tree.insert(key, v1), None);
        prop_assert_eq!(tree.insert(key, v2), Some(v1));
        prop_assert_eq!(tree.len(), 1);
        prop_assert_eq!(tree.get(&key), Some(&v2));
    }

    /// Arbitrary operation sequences agree with the BTreeMap oracle at
    /// every step and leave the invariants intact.
    #[test]
    fn matches_btreemap_oracle(order in small_order(), ops in operations(300)) {
        let mut tree = BPlusTree::new(order);
        let mut oracle = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(tree.insert(key, value), oracle.insert(key, value));
                }
                Op::Get(key) => {
                    prop_assert_eq!(tree.get(&key), oracle.get(&key));
                }
            }
        }

        prop_assert_eq!(tree.len(), oracle.len());
        prop_assert_eq!(tree.is_empty(), oracle.is_empty());
        for (key, value) in &oracle {
            prop_assert_eq!(tree.get(key), Some(value));
        }
        if let Err(violation) = tree.check_invariants_detailed() {
            return Err(TestCaseError::fail(violation));
        }
    }

    /// Monotone workloads of any length keep all leaves at one depth and
    /// within capacity (the validator checks both).
    #[test]
    fn ascending_workload_stays_balanced(order in small_order(), count in 0usize..400) {
        let mut tree = BPlusTree::new(order);
        for key in 0..count {
            tree.insert(key, key);
        }
        prop_assert_eq!(tree.len(), count);
        prop_assert!(tree.check_invariants(), "invariants violated after {} inserts", count);
    }

    /// clear always returns the tree to a working empty state.
    #[test]
    fn clear_is_total_and_idempotent(ops in operations(100)) {
        let mut tree = BPlusTree::new(4);
        for op in ops {
            if let Op::Insert(key, value) = op {
                tree.insert(key, value);
            }
        }

        tree.clear();
        tree.clear();
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.len(), 0);
        prop_assert_eq!(tree.get(&0), None);

        tree.insert(1, 1);
        prop_assert_eq!(tree.get(&1), Some(&1));
    }
}
