//! Insert operations: descent, leaf insertion, splitting, and upward median
//! propagation.
//!
//! An insertion descends from the root recording every branch it passes into
//! an [`AncestorTrail`], mutates the owning leaf, and on overflow splits it
//! and walks the trail back up - nearest ancestor first - until some branch
//! has room for the promoted median or the trail runs out, at which point a
//! new root is allocated and the tree grows a level.

use std::cmp::Ordering;
use std::mem;

use crate::comparator::Comparator;
use crate::error::{ModifyResult, TreeError};
use crate::tracing_support::{debug_log, trace_log};
use crate::trail::AncestorTrail;
use crate::types::{BPlusTree, BranchNode, LeafNode, NodeRef, NULL_NODE};

impl<K: Clone, V, C: Comparator<K>> BPlusTree<K, V, C> {
    /// Insert a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// Keys are single-valued: inserting a key that compares equal to an
    /// existing entry updates that entry in place. Overflowing a node splits
    /// it; splits propagate toward the root and can grow the tree by one
    /// level, but never surface to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use bptree::BPlusTree;
    ///
    /// let mut tree = BPlusTree::new(4);
    /// assert_eq!(tree.insert(7, "old"), None);
    /// assert_eq!(tree.insert(7, "new"), Some("old"));
    /// assert_eq!(tree.get(&7), Some(&"new"));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree structure is corrupt (a handle on the descent path
    /// resolves to nothing); this signals a logic defect, not a caller
    /// error.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let mut leaf = LeafNode::new(self.key_capacity());
            leaf.insert_at(0, key, value);
            let root_id = self.leaf_arena.allocate(leaf);
            self.root = Some(NodeRef::Leaf(root_id));
            debug_log!(root = root_id, "allocated root leaf");
            return None;
        };

        // Descend to the owning leaf, recording the branches passed through.
        let mut trail = AncestorTrail::new();
        let mut current = root;
        let leaf_id = loop {
            match current {
                NodeRef::Leaf(id) => break id,
                NodeRef::Branch(id) => {
                    trail.push(id);
                    let branch = self
                        .branch_arena
                        .get(id)
                        .expect("descent reached a branch id missing from the arena");
                    current = branch.children[branch.find_child_index(&key, &self.comparator)];
                }
            }
        };
        trace_log!(leaf = leaf_id, ancestors = trail.depth(), "descended to leaf");
        // Every leaf sits below the full stack of branch levels; anything
        // else means the structure is corrupt.
        debug_assert_eq!(trail.depth(), self.height() - 1);

        let leaf = self
            .leaf_arena
            .get_mut(leaf_id)
            .expect("descent reached a leaf id missing from the arena");
        let slot = leaf.find_slot(&key, &self.comparator);
        if slot < leaf.len() && self.comparator.compare(&key, &leaf.keys[slot]) == Ordering::Equal {
            return Some(mem::replace(&mut leaf.values[slot], value));
        }
        if !leaf.is_full() {
            leaf.insert_at(slot, key, value);
            return None;
        }

        // Overflow. The leaf's own vectors double as the sorted merge
        // buffer: insert first, then partition.
        leaf.insert_at(slot, key, value);
        let mut sibling = leaf.split();
        let median = sibling.keys[0].clone();

        // Splice the sibling into the doubly linked chain.
        let chain_successor = sibling.next;
        sibling.prev = leaf_id;
        let sibling_id = self.leaf_arena.allocate(sibling);
        self.leaf_arena
            .get_mut(leaf_id)
            .expect("split leaf vanished from the arena")
            .next = sibling_id;
        if chain_successor != NULL_NODE {
            self.leaf_arena
                .get_mut(chain_successor)
                .expect("leaf chain successor missing from the arena")
                .prev = sibling_id;
        }
        debug_log!(leaf = leaf_id, sibling = sibling_id, "split leaf");

        self.propagate_split(
            trail,
            NodeRef::Leaf(leaf_id),
            NodeRef::Leaf(sibling_id),
            median,
        );
        None
    }

    /// Push a completed split upward, consuming the trail nearest-ancestor
    /// first.
    ///
    /// Each turn of the loop either finds room in an ancestor and stops, or
    /// splits that ancestor and continues with one fewer frame; the empty
    /// trail means the root itself split, so a new root is allocated above
    /// the pair. Termination is therefore bounded by the tree height.
    fn propagate_split(
        &mut self,
        mut trail: AncestorTrail,
        mut left: NodeRef,
        mut right: NodeRef,
        mut median: K,
    ) {
        loop {
            let Some(ancestor_id) = trail.pop() else {
                // Every ancestor overflowed: grow a new root above the pair.
                let mut new_root = BranchNode::new(self.key_capacity());
                new_root.keys.push(median);
                new_root.children.push(left);
                new_root.children.push(right);
                let root_id = self.branch_arena.allocate(new_root);
                self.root = Some(NodeRef::Branch(root_id));
                debug_log!(root = root_id, "tree grew a level");
                return;
            };

            let ancestor = self
                .branch_arena
                .get_mut(ancestor_id)
                .expect("ancestor trail references a branch missing from the arena");
            let slot = ancestor.find_slot(&median, &self.comparator);
            if !ancestor.is_full() {
                ancestor.insert_at(slot, median, right);
                return;
            }

            // Same merge-buffer trick as the leaf: insert into the full
            // branch, then split around the median.
            ancestor.insert_at(slot, median, right);
            let (sibling, promoted) = ancestor.split();
            let sibling_id = self.branch_arena.allocate(sibling);
            debug_log!(branch = ancestor_id, sibling = sibling_id, "split branch");

            left = NodeRef::Branch(ancestor_id);
            right = NodeRef::Branch(sibling_id);
            median = promoted;
        }
    }

    /// Insert with invariant validation before and after the mutation.
    ///
    /// Mostly useful in tests and debugging sessions; plain [`insert`] does
    /// not pay for the validation walks.
    ///
    /// [`insert`]: BPlusTree::insert
    pub fn try_insert(&mut self, key: K, value: V) -> ModifyResult<Option<V>> {
        self.check_invariants_detailed()
            .map_err(|details| TreeError::data_integrity("pre-insert validation", &details))?;

        let previous = self.insert(key, value);

        self.check_invariants_detailed()
            .map_err(|details| TreeError::data_integrity("post-insert validation", &details))?;
        Ok(previous)
    }
}
