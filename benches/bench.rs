use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use std::collections::BTreeSet;

use avl_tree::Tree;

#[derive(Clone)]
enum SetEnum<K> {
    Avl(Tree<K>),
    Std(BTreeSet<K>),
}

impl<K> SetEnum<K> {
    fn find(&self, k: &K) -> bool
    where
        K: Ord,
    {
        match self {
            Self::Avl(t) => t.find(k),
            Self::Std(t) => t.contains(k),
        }
    }

    fn insert(&mut self, k: K)
    where
        K: Ord,
    {
        match self {
            Self::Avl(t) => {
                t.insert(k);
            }
            Self::Std(t) => {
                t.insert(k);
            }
        }
    }
}

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Keys in the order that fills a plain BST level by level: each range's midpoint, then both
/// halves.
fn balanced_order(xs: &[i32], out: &mut Vec<i32>) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        out.push(xs[mid]);
        balanced_order(&xs[..mid], out);
        balanced_order(&xs[mid + 1..], out);
    }
}

/// Helper to bench a function on a set.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of sets before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut SetEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = num_nodes_in_full_tree(num_levels);
        let largest_element_in_tree = num_nodes as i32 - 1;

        let set_tests = [
            ("avl", SetEnum::Avl((0..num_nodes as i32).collect())),
            ("btreeset", SetEnum::Std((0..num_nodes as i32).collect())),
        ];
        for (name, set) in set_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut set = black_box(set.clone());
                        let instant = std::time::Instant::now();
                        f(&mut set, black_box(largest_element_in_tree));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Builds whole trees from ascending keys (which need constant rotation) and from keys already
/// in balanced order (which need none).
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for num_levels in [3, 7, 11, 15] {
        let ascending = (0..num_nodes_in_full_tree(num_levels) as i32).collect::<Vec<_>>();
        let mut balanced = Vec::with_capacity(ascending.len());
        balanced_order(&ascending, &mut balanced);

        for (name, keys) in [("ascending", &ascending), ("balanced", &balanced)] {
            let id = BenchmarkId::new(name, keys.len());

            group.bench_with_input(id, keys, |b, keys| {
                b.iter(|| keys.iter().copied().collect::<Tree<_>>())
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |set, i| {
        let _found = black_box(set.find(&i));
    });
    bench_helper(c, "insert", |set, i| {
        set.insert(i + 1);
    });
    bench_helper(c, "insert-duplicate", |set, i| {
        set.insert(i);
    });
    bench_helper(c, "find-miss", |set, i| {
        let _found = black_box(set.find(&(i + 1)));
    });
    bench_build(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
