//! Node-level operations: slot search, sorted insertion, and splitting.
//!
//! Both node shapes locate slots with a sequential comparator scan and keep
//! their vectors sorted at all times. Splitting uses the overfull node's own
//! vectors as the merged scratch buffer: the caller inserts the overflowing
//! entry first, then partitions. A leaf split copies its median up (leaves
//! keep all data for chain scans); a branch split promotes the median out of
//! both halves.

use std::cmp::Ordering;

use crate::comparator::Comparator;
use crate::types::{BranchNode, LeafNode, NodeRef, NULL_NODE};

// ============================================================================
// LEAF NODE OPERATIONS
// ============================================================================

impl<K, V> LeafNode<K, V> {
    /// Index of the first key not less than `key`; the insertion slot, and
    /// the position of `key` itself when present.
    // TODO: switch to a binary search once orders beyond a few dozen keys
    // are in real use; at the defaults the linear scan wins on locality.
    pub(crate) fn find_slot<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        let mut slot = 0;
        while slot < self.keys.len() && cmp.compare(key, &self.keys[slot]) == Ordering::Greater {
            slot += 1;
        }
        slot
    }

    /// Number of key-value pairs in this leaf.
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this leaf is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.keys.len() >= self.capacity
    }

    /// Insert a pair at a precomputed slot, shifting later entries right.
    pub(crate) fn insert_at(&mut self, slot: usize, key: K, value: V) {
        self.keys.insert(slot, key);
        self.values.insert(slot, value);
    }

    /// Split an overfull leaf, returning the new right sibling.
    ///
    /// The left half keeps `ceil(len / 2)` entries - ties toward the left -
    /// so both halves stay within capacity and non-empty for any order. The
    /// sibling takes over this leaf's successor link; the caller splices ids
    /// once the sibling has one. The caller promotes a copy of the sibling's
    /// first key as the median.
    pub(crate) fn split(&mut self) -> LeafNode<K, V> {
        debug_assert!(
            self.keys.len() > self.capacity,
            "split invoked on a leaf that is not overfull"
        );
        let mid = self.keys.len().div_ceil(2);
        let sibling_keys = self.keys.split_off(mid);
        let sibling_values = self.values.split_off(mid);

        let sibling = LeafNode {
            capacity: self.capacity,
            keys: sibling_keys,
            values: sibling_values,
            prev: NULL_NODE,
            next: self.next,
        };
        self.next = NULL_NODE;
        sibling
    }
}

// ============================================================================
// BRANCH NODE OPERATIONS
// ============================================================================

impl<K> BranchNode<K> {
    /// Index of the child to descend into for `key`.
    ///
    /// Advances past every separator at or below `key`: keys equal to a
    /// separator live in its right subtree.
    pub(crate) fn find_child_index<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        let mut index = 0;
        while index < self.keys.len() && cmp.compare(key, &self.keys[index]) != Ordering::Less {
            index += 1;
        }
        index
    }

    /// Index of the first separator not less than `key`; where a newly
    /// promoted median belongs.
    pub(crate) fn find_slot<C: Comparator<K>>(&self, key: &K, cmp: &C) -> usize {
        let mut slot = 0;
        while slot < self.keys.len() && cmp.compare(key, &self.keys[slot]) == Ordering::Greater {
            slot += 1;
        }
        slot
    }

    /// Returns true if this branch is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.keys.len() >= self.capacity
    }

    /// Insert a separator and the child to its right at a precomputed slot.
    ///
    /// The child shift starts one position past the key shift; the new child
    /// covers the keys at and above the new separator.
    pub(crate) fn insert_at(&mut self, slot: usize, key: K, right_child: NodeRef) {
        self.keys.insert(slot, key);
        self.children.insert(slot + 1, right_child);
    }

    /// Split an overfull branch, returning the new right sibling and the
    /// promoted median key.
    ///
    /// Unlike a leaf split the median leaves both halves: the left keeps the
    /// keys below it, the sibling the keys above it, and each half keeps one
    /// more child than it has keys.
    pub(crate) fn split(&mut self) -> (BranchNode<K>, K) {
        debug_assert!(
            self.keys.len() > self.capacity,
            "split invoked on a branch that is not overfull"
        );
        let mid = (self.keys.len() - 1) / 2;
        let sibling_keys = self.keys.split_off(mid + 1);
        let sibling_children = self.children.split_off(mid + 1);
        let promoted = self
            .keys
            .pop()
            .expect("overfull branch holds a median key");

        let sibling = BranchNode {
            capacity: self.capacity,
            keys: sibling_keys,
            children: sibling_children,
        };
        (sibling, promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NativeComparator;
    use crate::types::NodeRef;

    fn leaf_with(capacity: usize, keys: &[i32]) -> LeafNode<i32, i32> {
        let mut leaf = LeafNode::new(capacity);
        for (slot, &key) in keys.iter().enumerate() {
            leaf.insert_at(slot, key, key * 10);
        }
        leaf
    }

    #[test]
    fn leaf_find_slot_scans_forward() {
        let leaf = leaf_with(3, &[10, 20, 30]);
        let cmp = NativeComparator;
        assert_eq!(leaf.find_slot(&5, &cmp), 0);
        assert_eq!(leaf.find_slot(&10, &cmp), 0);
        assert_eq!(leaf.find_slot(&15, &cmp), 1);
        assert_eq!(leaf.find_slot(&30, &cmp), 2);
        assert_eq!(leaf.find_slot(&99, &cmp), 3);
    }

    #[test]
    fn leaf_split_balances_even_merge() {
        // Capacity 3, overfull with 4: equal halves.
        let mut leaf = leaf_with(3, &[1, 2, 3, 4]);
        let sibling = leaf.split();
        assert_eq!(leaf.keys, vec![1, 2]);
        assert_eq!(sibling.keys, vec![3, 4]);
        assert_eq!(sibling.values, vec![30, 40]);
    }

    #[test]
    fn leaf_split_ties_toward_left() {
        // Capacity 4, overfull with 5: left absorbs the extra entry.
        let mut leaf = leaf_with(4, &[1, 2, 3, 4, 5]);
        let sibling = leaf.split();
        assert_eq!(leaf.keys, vec![1, 2, 3]);
        assert_eq!(sibling.keys, vec![4, 5]);
    }

    #[test]
    fn leaf_split_hands_over_successor_link() {
        let mut leaf = leaf_with(3, &[1, 2, 3, 4]);
        leaf.next = 17;
        let sibling = leaf.split();
        assert_eq!(sibling.next, 17);
        assert_eq!(leaf.next, crate::types::NULL_NODE);
    }

    fn branch_with(capacity: usize, keys: &[i32]) -> BranchNode<i32> {
        let mut branch = BranchNode::new(capacity);
        branch.children.push(NodeRef::Leaf(0));
        for (slot, &key) in keys.iter().enumerate() {
            branch.insert_at(slot, key, NodeRef::Leaf(slot as u32 + 1));
        }
        branch
    }

    #[test]
    fn branch_routes_equal_keys_right() {
        let branch = branch_with(3, &[10, 20, 30]);
        let cmp = NativeComparator;
        assert_eq!(branch.find_child_index(&5, &cmp), 0);
        assert_eq!(branch.find_child_index(&10, &cmp), 1);
        assert_eq!(branch.find_child_index(&25, &cmp), 2);
        assert_eq!(branch.find_child_index(&30, &cmp), 3);
        assert_eq!(branch.find_child_index(&99, &cmp), 3);
    }

    #[test]
    fn branch_insert_keeps_child_offset() {
        let mut branch = branch_with(3, &[10, 30]);
        let cmp = NativeComparator;
        let slot = branch.find_slot(&20, &cmp);
        branch.insert_at(slot, 20, NodeRef::Leaf(42));
        assert_eq!(branch.keys, vec![10, 20, 30]);
        assert_eq!(branch.children[2], NodeRef::Leaf(42));
        assert_eq!(branch.children.len(), branch.keys.len() + 1);
    }

    #[test]
    fn branch_split_promotes_median_out_of_both_halves() {
        // Capacity 3, overfull with 4 keys and 5 children.
        let mut branch = branch_with(3, &[10, 20, 30, 40]);
        let (sibling, promoted) = branch.split();

        assert_eq!(promoted, 20);
        assert_eq!(branch.keys, vec![10]);
        assert_eq!(branch.children.len(), 2);
        assert_eq!(sibling.keys, vec![30, 40]);
        assert_eq!(sibling.children.len(), 3);
    }
}
