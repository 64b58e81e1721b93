//! In-memory ordered key-value index built on a B+ tree.
//!
//! All entries live in leaf nodes that form a doubly linked, globally sorted
//! chain; branch nodes hold separator keys and route point lookups to the
//! owning leaf. Nodes are stored in arena slabs and addressed by stable ids,
//! and key ordering is supplied by a [`Comparator`] injected at construction
//! rather than by the key type's own operators.
//!
//! Insertion keeps the tree balanced by construction: a full node splits and
//! promotes its median key toward the root, and only a root split adds a
//! level, so every leaf always sits at the same depth.
//!
//! ```
//! use bptree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4);
//! for i in 0..10 {
//!     tree.insert(i, i * 100);
//! }
//!
//! assert_eq!(tree.get(&7), Some(&700));
//! assert_eq!(tree.len(), 10);
//! assert!(!tree.is_empty());
//! ```

mod arena;
mod comparator;
mod construction;
mod error;
mod get_operations;
mod insert_operations;
mod node;
mod tracing_support;
mod trail;
mod types;
mod validation;

pub use comparator::{Comparator, NativeComparator, PrefixComparator};
pub use construction::DEFAULT_ORDER;
pub use error::{KeyResult, ModifyResult, TreeError};
pub use types::{BPlusTree, NodeId, NULL_NODE};

use tracing_support::debug_log;
use types::NodeRef;

impl<K, V, C> BPlusTree<K, V, C> {
    // ========================================================================
    // TREE-LEVEL QUERIES
    // ========================================================================

    /// Maximum number of children per branch node.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Maximum number of keys any node may hold (`order - 1`).
    pub(crate) fn key_capacity(&self) -> usize {
        self.order - 1
    }

    /// Returns true if the tree holds no entries; exactly the trees with no
    /// root allocated.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns true if the root is a leaf node (single-level tree).
    pub fn is_leaf_root(&self) -> bool {
        self.root.is_some_and(|root| root.is_leaf())
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        match &self.root {
            Some(root) => self.len_recursive(root),
            None => 0,
        }
    }

    /// Recursively count entries with proper arena access.
    fn len_recursive(&self, node: &NodeRef) -> usize {
        match node {
            NodeRef::Leaf(id) => self.leaf_arena.get(*id).map(|leaf| leaf.len()).unwrap_or(0),
            NodeRef::Branch(id) => self
                .branch_arena
                .get(*id)
                .map(|branch| {
                    branch
                        .children
                        .iter()
                        .map(|child| self.len_recursive(child))
                        .sum()
                })
                .unwrap_or(0),
        }
    }

    /// Number of levels from the root down to the leaves; 0 for an empty
    /// tree, 1 while the root is still a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = current {
            height += 1;
            current = match node {
                NodeRef::Leaf(_) => None,
                NodeRef::Branch(id) => self
                    .branch_arena
                    .get(id)
                    .and_then(|branch| branch.children.first().copied()),
            };
        }
        height
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn leaf_count(&self) -> usize {
        match &self.root {
            Some(root) => self.leaf_count_recursive(root),
            None => 0,
        }
    }

    /// Recursively count leaf nodes with proper arena access.
    fn leaf_count_recursive(&self, node: &NodeRef) -> usize {
        match node {
            NodeRef::Leaf(_) => 1,
            NodeRef::Branch(id) => self
                .branch_arena
                .get(*id)
                .map(|branch| {
                    branch
                        .children
                        .iter()
                        .map(|child| self.leaf_count_recursive(child))
                        .sum()
                })
                .unwrap_or(0),
        }
    }

    // ========================================================================
    // DESTRUCTION
    // ========================================================================

    /// Release every node and return the tree to the empty state.
    ///
    /// Nodes are owned by the arenas, so teardown is a wholesale release of
    /// both slabs; the non-owning leaf chain links never drive deallocation.
    /// Idempotent: clearing an empty tree is a no-op. Dropping the tree
    /// releases everything the same way.
    pub fn clear(&mut self) {
        self.leaf_arena.clear();
        self.branch_arena.clear();
        self.root = None;
        debug_log!("cleared tree");
    }
}
