//! Validation and debugging utilities.
//!
//! The checks here cover every structural invariant the tree promises: key
//! capacity and ordering inside each node, branch child counts, uniform leaf
//! depth, the doubly linked leaf chain (order, completeness, back-links),
//! and agreement between the arenas and the reachable structure. Tests and
//! [`try_insert`](crate::BPlusTree::try_insert) lean on these; the hot paths
//! never pay for them.

use std::cmp::Ordering;

use crate::comparator::Comparator;
use crate::error::{TreeError, TreeResult};
use crate::types::{BPlusTree, NodeId, NodeRef, NULL_NODE};

impl<K, V, C: Comparator<K>> BPlusTree<K, V, C> {
    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Check if the tree maintains its structural invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            // An empty tree owns nothing: both arenas must have been
            // released wholesale.
            if self.leaf_arena.is_empty() && self.branch_arena.is_empty() {
                return Ok(());
            }
            return Err("empty tree still holds arena nodes".to_string());
        };

        let mut leaf_depths = Vec::new();
        self.check_node(&root, None, None, 1, &mut leaf_depths)?;

        if let Some((&first, rest)) = leaf_depths.split_first() {
            if rest.iter().any(|&depth| depth != first) {
                return Err(format!(
                    "leaves sit at non-uniform depths: {:?}",
                    leaf_depths
                ));
            }
        }

        self.check_leaf_chain()?;
        self.check_arena_consistency().map_err(|e| e.to_string())?;
        Ok(())
    }

    /// Recursively check one node and its subtree against the key window
    /// `[min_key, max_key)` inherited from its ancestors.
    fn check_node(
        &self,
        node: &NodeRef,
        min_key: Option<&K>,
        max_key: Option<&K>,
        depth: usize,
        leaf_depths: &mut Vec<usize>,
    ) -> Result<(), String> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = self
                    .leaf_arena
                    .get(*id)
                    .ok_or_else(|| format!("leaf {} missing from arena", id))?;

                if leaf.keys.len() != leaf.values.len() {
                    return Err(format!(
                        "leaf {} holds {} keys but {} values",
                        id,
                        leaf.keys.len(),
                        leaf.values.len()
                    ));
                }
                if leaf.keys.is_empty() {
                    return Err(format!("leaf {} holds no keys", id));
                }
                if leaf.keys.len() > self.key_capacity() {
                    return Err(format!(
                        "leaf {} holds {} keys, capacity is {}",
                        id,
                        leaf.keys.len(),
                        self.key_capacity()
                    ));
                }
                for window in leaf.keys.windows(2) {
                    if self.comparator.compare(&window[0], &window[1]) != Ordering::Less {
                        return Err(format!("leaf {} keys out of order", id));
                    }
                }
                for key in &leaf.keys {
                    if let Some(min) = min_key {
                        if self.comparator.compare(key, min) == Ordering::Less {
                            return Err(format!("leaf {} key below its separator window", id));
                        }
                    }
                    if let Some(max) = max_key {
                        if self.comparator.compare(key, max) != Ordering::Less {
                            return Err(format!("leaf {} key at or above its separator window", id));
                        }
                    }
                }

                leaf_depths.push(depth);
                Ok(())
            }
            NodeRef::Branch(id) => {
                let branch = self
                    .branch_arena
                    .get(*id)
                    .ok_or_else(|| format!("branch {} missing from arena", id))?;

                if branch.keys.is_empty() {
                    return Err(format!("branch {} holds no keys", id));
                }
                if branch.keys.len() + 1 != branch.children.len() {
                    return Err(format!(
                        "branch {} holds {} keys but {} children",
                        id,
                        branch.keys.len(),
                        branch.children.len()
                    ));
                }
                if branch.keys.len() > self.key_capacity() {
                    return Err(format!(
                        "branch {} holds {} keys, capacity is {}",
                        id,
                        branch.keys.len(),
                        self.key_capacity()
                    ));
                }
                for window in branch.keys.windows(2) {
                    if self.comparator.compare(&window[0], &window[1]) != Ordering::Less {
                        return Err(format!("branch {} keys out of order", id));
                    }
                }

                for (child_index, child) in branch.children.iter().enumerate() {
                    let child_min = if child_index == 0 {
                        min_key
                    } else {
                        Some(&branch.keys[child_index - 1])
                    };
                    let child_max = if child_index == branch.keys.len() {
                        max_key
                    } else {
                        Some(&branch.keys[child_index])
                    };
                    self.check_node(child, child_min, child_max, depth + 1, leaf_depths)?;
                }
                Ok(())
            }
        }
    }

    /// Check that the leaf chain is complete, ordered, and properly doubly
    /// linked.
    fn check_leaf_chain(&self) -> Result<(), String> {
        let Some(first_id) = self.first_leaf_id() else {
            return Err("non-empty tree has no leftmost leaf".to_string());
        };

        let mut chain_ids = Vec::new();
        let mut chain_key_count = 0;
        let mut previous_id = NULL_NODE;
        let mut previous_key: Option<&K> = None;
        let mut current_id = first_id;

        loop {
            let leaf = self
                .leaf_arena
                .get(current_id)
                .ok_or_else(|| format!("leaf chain reaches unallocated node {}", current_id))?;

            if leaf.prev != previous_id {
                return Err(format!(
                    "leaf {} back-link points at {}, expected {}",
                    current_id, leaf.prev, previous_id
                ));
            }
            for key in &leaf.keys {
                if let Some(previous) = previous_key {
                    if self.comparator.compare(previous, key) != Ordering::Less {
                        return Err(format!("leaf chain out of order at leaf {}", current_id));
                    }
                }
                previous_key = Some(key);
            }

            chain_ids.push(current_id);
            chain_key_count += leaf.keys.len();
            if leaf.next == NULL_NODE {
                break;
            }
            previous_id = current_id;
            current_id = leaf.next;
        }

        if chain_key_count != self.len() {
            return Err(format!(
                "leaf chain yields {} keys but tree holds {}",
                chain_key_count,
                self.len()
            ));
        }

        // Every leaf reachable from the root must appear on the chain, and
        // nothing else.
        let mut tree_ids = Vec::new();
        if let Some(root) = &self.root {
            self.collect_leaf_ids(root, &mut tree_ids);
        }
        tree_ids.sort_unstable();
        chain_ids.sort_unstable();
        if tree_ids != chain_ids {
            return Err(format!(
                "leaf chain {:?} disagrees with tree structure {:?}",
                chain_ids, tree_ids
            ));
        }

        Ok(())
    }

    /// Check that arena allocation matches the reachable tree structure.
    fn check_arena_consistency(&self) -> TreeResult<()> {
        let (tree_leaves, tree_branches) = match &self.root {
            Some(root) => self.count_nodes(root),
            None => (0, 0),
        };

        if tree_leaves != self.leaf_arena.len() {
            return Err(TreeError::corrupted_tree(
                "leaf arena",
                &format!(
                    "{} leaves in tree vs {} allocated",
                    tree_leaves,
                    self.leaf_arena.len()
                ),
            ));
        }
        if tree_branches != self.branch_arena.len() {
            return Err(TreeError::corrupted_tree(
                "branch arena",
                &format!(
                    "{} branches in tree vs {} allocated",
                    tree_branches,
                    self.branch_arena.len()
                ),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // STRUCTURE WALKS
    // ========================================================================

    /// Id of the leftmost leaf, `None` for an empty tree.
    fn first_leaf_id(&self) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            match current {
                NodeRef::Leaf(id) => return Some(id),
                NodeRef::Branch(id) => {
                    current = *self.branch_arena.get(id)?.children.first()?;
                }
            }
        }
    }

    /// Collect the ids of every leaf reachable from `node`, left to right.
    fn collect_leaf_ids(&self, node: &NodeRef, ids: &mut Vec<NodeId>) {
        match node {
            NodeRef::Leaf(id) => ids.push(*id),
            NodeRef::Branch(id) => {
                if let Some(branch) = self.branch_arena.get(*id) {
                    for child in &branch.children {
                        self.collect_leaf_ids(child, ids);
                    }
                }
            }
        }
    }

    /// Count the (leaf, branch) nodes reachable from `node`.
    fn count_nodes(&self, node: &NodeRef) -> (usize, usize) {
        match node {
            NodeRef::Leaf(_) => (1, 0),
            NodeRef::Branch(id) => {
                let mut leaves = 0;
                let mut branches = 1;
                if let Some(branch) = self.branch_arena.get(*id) {
                    for child in &branch.children {
                        let (child_leaves, child_branches) = self.count_nodes(child);
                        leaves += child_leaves;
                        branches += child_branches;
                    }
                }
                (leaves, branches)
            }
        }
    }

    // ========================================================================
    // DEBUGGING HELPERS
    // ========================================================================

    /// Sizes of all leaf nodes in chain order (for tests and debugging).
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut current = self.first_leaf_id();
        while let Some(id) = current {
            let Some(leaf) = self.leaf_arena.get(id) else {
                break;
            };
            sizes.push(leaf.len());
            current = (leaf.next != NULL_NODE).then_some(leaf.next);
        }
        sizes
    }

    /// Print the node structure for debugging.
    pub fn print_structure(&self) {
        match &self.root {
            Some(root) => self.print_node(root, 0),
            None => println!("<empty tree>"),
        }
    }

    /// Print a node and its children recursively.
    fn print_node(&self, node: &NodeRef, depth: usize) {
        let indent = "  ".repeat(depth);
        match node {
            NodeRef::Leaf(id) => match self.leaf_arena.get(*id) {
                Some(leaf) => println!(
                    "{}Leaf[id={}, prev={}, next={}]: {} keys",
                    indent,
                    id,
                    leaf.prev,
                    leaf.next,
                    leaf.len()
                ),
                None => println!("{}Leaf[id={}]: <missing>", indent, id),
            },
            NodeRef::Branch(id) => match self.branch_arena.get(*id) {
                Some(branch) => {
                    println!(
                        "{}Branch[id={}]: {} keys, {} children",
                        indent,
                        id,
                        branch.keys.len(),
                        branch.children.len()
                    );
                    for child in &branch.children {
                        self.print_node(child, depth + 1);
                    }
                }
                None => println!("{}Branch[id={}]: <missing>", indent, id),
            },
        }
    }
}
