//! Read operations: point lookup through the branch levels to the owning
//! leaf.
//!
//! Lookups descend exactly the way insertion does, but record no trail and
//! treat a dangling handle as absence rather than a fault.

use std::cmp::Ordering;

use crate::comparator::Comparator;
use crate::error::{KeyResult, TreeError};
use crate::types::{BPlusTree, NodeId, NodeRef};

impl<K, V, C: Comparator<K>> BPlusTree<K, V, C> {
    /// Get a reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(4);
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let (leaf_id, slot) = self.locate(key)?;
        self.leaf_arena
            .get(leaf_id)
            .and_then(|leaf| leaf.values.get(slot))
    }

    /// Get a mutable reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(4);
    /// tree.insert(1, 10);
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(tree.get(&1), Some(&15));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (leaf_id, slot) = self.locate(key)?;
        self.leaf_arena
            .get_mut(leaf_id)
            .and_then(|leaf| leaf.values.get_mut(slot))
    }

    /// Check if a key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Lookup that reports absence as an error instead of `None`.
    pub fn get_item(&self, key: &K) -> KeyResult<&V> {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Descend to the leaf owning `key` and return its id together with the
    /// slot holding a comparator-equal key, or `None` when absent.
    fn locate(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut current = self.root?;
        let leaf_id = loop {
            match current {
                NodeRef::Leaf(id) => break id,
                NodeRef::Branch(id) => {
                    let branch = self.branch_arena.get(id)?;
                    let child_index = branch.find_child_index(key, &self.comparator);
                    current = *branch.children.get(child_index)?;
                }
            }
        };

        let leaf = self.leaf_arena.get(leaf_id)?;
        let slot = leaf.find_slot(key, &self.comparator);
        match leaf.keys.get(slot) {
            Some(found) if self.comparator.compare(key, found) == Ordering::Equal => {
                Some((leaf_id, slot))
            }
            _ => None,
        }
    }
}
