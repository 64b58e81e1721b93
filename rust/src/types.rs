//! Core types and data structures for the B+ tree index.
//!
//! This module contains the tree struct itself, the two node shapes, and the
//! handle type used to address nodes inside the arenas.

use crate::arena::NodeArena;
use crate::comparator::NativeComparator;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum order (children per branch node) for any tree.
pub(crate) const MIN_ORDER: usize = 3;

/// Node ID type for arena-based allocation.
pub type NodeId = u32;

/// Sentinel id marking the absence of a neighbor in the leaf chain.
pub const NULL_NODE: NodeId = u32::MAX;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered key-value index backed by a B+ tree.
///
/// All entries live in leaf nodes, which form a doubly linked, globally
/// sorted chain; branch nodes hold separator keys only and route point
/// lookups to the owning leaf. Key ordering comes from a [`Comparator`]
/// supplied at construction, so keys do not need to implement `Ord`.
///
/// The tree's *order* is the maximum number of children a branch node may
/// hold; every node's key capacity is `order - 1`. Inserting into a full
/// node splits it and pushes the median key toward the root, growing the
/// tree by one level when the root itself overflows. All leaves therefore
/// sit at the same depth at all times.
///
/// # Examples
///
/// ```
/// use bptree::BPlusTree;
///
/// let mut tree = BPlusTree::new(4);
/// tree.insert(1, "one");
/// tree.insert(2, "two");
/// tree.insert(3, "three");
///
/// assert_eq!(tree.get(&2), Some(&"two"));
/// assert_eq!(tree.len(), 3);
/// ```
///
/// [`Comparator`]: crate::Comparator
#[derive(Debug)]
pub struct BPlusTree<K, V, C = NativeComparator> {
    /// Maximum number of children per branch node; key capacity is `order - 1`.
    pub(crate) order: usize,
    /// Root node handle; `None` iff the tree is empty.
    pub(crate) root: Option<NodeRef>,
    /// Ordering strategy injected at construction.
    pub(crate) comparator: C,
    /// Arena storage for leaf nodes.
    pub(crate) leaf_arena: NodeArena<LeafNode<K, V>>,
    /// Arena storage for branch nodes.
    pub(crate) branch_arena: NodeArena<BranchNode<K>>,
}

/// Leaf node holding key-value pairs and its neighbors in the leaf chain.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    /// Maximum number of keys this node may hold.
    pub(crate) capacity: usize,
    /// Sorted list of keys.
    pub(crate) keys: Vec<K>,
    /// Values corresponding to `keys`, slot for slot.
    pub(crate) values: Vec<V>,
    /// Previous leaf in the chain; `NULL_NODE` for the leftmost leaf.
    pub(crate) prev: NodeId,
    /// Next leaf in the chain; `NULL_NODE` for the rightmost leaf.
    pub(crate) next: NodeId,
}

/// Internal (branch) node holding separator keys and child handles.
///
/// Holds exactly `keys.len() + 1` children: keys reachable through child
/// `i` compare below `keys[i]`, keys through child `i + 1` compare at or
/// above it.
#[derive(Debug, Clone)]
pub struct BranchNode<K> {
    /// Maximum number of keys this node may hold.
    pub(crate) capacity: usize,
    /// Sorted list of separator keys.
    pub(crate) keys: Vec<K>,
    /// Child node handles, one more than `keys`.
    pub(crate) children: Vec<NodeRef>,
}

/// Handle to a node in one of the tree's arenas.
///
/// Branch-to-child edges hold the owning handles; leaf `prev`/`next` ids are
/// non-owning and only ever used for chain traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Leaf(NodeId),
    Branch(NodeId),
}

impl NodeRef {
    /// Returns true if this handle points to a leaf node.
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_))
    }
}
