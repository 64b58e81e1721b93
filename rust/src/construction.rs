//! Construction and initialization for the tree and its nodes.
//!
//! A tree starts with no root; the first insertion allocates the root leaf.
//! An order below the minimum is clamped up rather than rejected, matching
//! the documented default-order fallback.

use crate::arena::NodeArena;
use crate::comparator::NativeComparator;
use crate::types::{BPlusTree, BranchNode, LeafNode, MIN_ORDER, NULL_NODE};

/// Order used by [`BPlusTree::default`] and the order the minimum clamps
/// toward in practice.
pub const DEFAULT_ORDER: usize = 4;

impl<K, V> BPlusTree<K, V> {
    /// Create an empty tree with the given order and `Ord`-based key
    /// comparison.
    ///
    /// `order` is the maximum number of children per branch node; every
    /// node's key capacity is `order - 1`. Values below 3 are clamped to 3.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree::BPlusTree;
    ///
    /// let tree = BPlusTree::<i32, String>::new(4);
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.order(), 4);
    /// ```
    pub fn new(order: usize) -> Self {
        Self::with_comparator(order, NativeComparator)
    }
}

impl<K, V, C> BPlusTree<K, V, C> {
    /// Create an empty tree with a custom ordering strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree::{BPlusTree, PrefixComparator};
    ///
    /// let mut tree = BPlusTree::with_comparator(4, PrefixComparator);
    /// tree.insert("fa".to_string(), 1);
    /// tree.insert("sol".to_string(), 2);
    /// assert_eq!(tree.get(&"sol".to_string()), Some(&2));
    /// ```
    pub fn with_comparator(order: usize, comparator: C) -> Self {
        Self {
            order: order.max(MIN_ORDER),
            root: None,
            comparator,
            leaf_arena: NodeArena::new(),
            branch_arena: NodeArena::new(),
        }
    }
}

impl<K, V> Default for BPlusTree<K, V> {
    /// Create an empty tree with [`DEFAULT_ORDER`].
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}

impl<K, V> LeafNode<K, V> {
    /// Create an empty leaf with the given key capacity, unlinked from the
    /// chain. Vectors are pre-reserved to avoid steady-state reallocation.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            prev: NULL_NODE,
            next: NULL_NODE,
        }
    }
}

impl<K> BranchNode<K> {
    /// Create an empty branch with the given key capacity; always holds one
    /// more child than keys once populated.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_clamps_small_orders() {
        assert_eq!(BPlusTree::<i32, i32>::new(0).order(), MIN_ORDER);
        assert_eq!(BPlusTree::<i32, i32>::new(2).order(), MIN_ORDER);
        assert_eq!(BPlusTree::<i32, i32>::new(3).order(), 3);
        assert_eq!(BPlusTree::<i32, i32>::new(64).order(), 64);
    }

    #[test]
    fn default_uses_default_order() {
        let tree = BPlusTree::<i32, String>::default();
        assert_eq!(tree.order(), DEFAULT_ORDER);
        assert!(tree.is_empty());
    }

    #[test]
    fn new_tree_has_no_nodes() {
        let tree = BPlusTree::<u64, u64>::new(8);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.leaf_count(), 0);
    }
}
