use std::collections::BTreeMap;
use std::hint::black_box;

use bptree::BPlusTree;
use criterion::{criterion_group, criterion_main, Criterion};

const ITEMS: u32 = 10_000;
const ORDER: usize = 16;

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_10k_sequential");

    group.bench_function("bptree", |b| {
        b.iter(|| {
            let mut tree = BPlusTree::new(ORDER);
            for i in 0..ITEMS {
                tree.insert(black_box(i), i);
            }
            tree
        })
    });

    group.bench_function("std_btreemap", |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..ITEMS {
                map.insert(black_box(i), i);
            }
            map
        })
    });

    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let mut tree = BPlusTree::new(ORDER);
    let mut map = BTreeMap::new();
    for i in 0..ITEMS {
        tree.insert(i, i);
        map.insert(i, i);
    }

    let mut group = c.benchmark_group("lookup_10k_hits");

    group.bench_function("bptree", |b| {
        b.iter(|| {
            for i in (0..ITEMS).step_by(7) {
                black_box(tree.get(&i));
            }
        })
    });

    group.bench_function("std_btreemap", |b| {
        b.iter(|| {
            for i in (0..ITEMS).step_by(7) {
                black_box(map.get(&i));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, insert_benchmark, lookup_benchmark);
criterion_main!(benches);
