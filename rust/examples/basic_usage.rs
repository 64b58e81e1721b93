//! Basic usage of the B+ tree index.
//!
//! Run with: cargo run --example basic_usage

use bptree::{BPlusTree, PrefixComparator};

fn main() {
    // Small order so the tree actually branches on a handful of entries.
    let mut tree = BPlusTree::new(4);

    for (key, name) in [
        (3, "ada"),
        (1, "grace"),
        (4, "alan"),
        (1, "edsger"), // updates key 1 in place
        (5, "barbara"),
        (9, "donald"),
        (2, "tony"),
        (6, "frances"),
    ] {
        if let Some(previous) = tree.insert(key, name) {
            println!("key {} updated (was {:?})", key, previous);
        }
    }

    println!(
        "{} entries across {} leaves, height {}",
        tree.len(),
        tree.leaf_count(),
        tree.height()
    );

    println!("key 4 -> {:?}", tree.get(&4));
    println!("key 8 -> {:?}", tree.get(&8));

    // A custom comparator changes what "the same key" means: with the
    // length-bounded prefix strategy, an extension of a stored key hits
    // the stored entry.
    let mut routes: BPlusTree<String, u32, PrefixComparator> =
        BPlusTree::with_comparator(4, PrefixComparator);
    routes.insert("eu".to_string(), 10);
    routes.insert("us".to_string(), 20);
    println!("eu-west routes via {:?}", routes.get(&"eu".to_string()));

    tree.clear();
    println!("cleared; empty = {}", tree.is_empty());
}
