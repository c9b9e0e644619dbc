//! Build / query / update benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use segtrace::{input::leaves_from_values, Leaf, Min, SegmentTree, Sum};

fn leaves(n: usize) -> Vec<Leaf<i64>> {
    let values: Vec<i64> = (0..n as i64).map(|i| (i * 7919) % 1009 - 500).collect();
    leaves_from_values(&values)
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    // Every build step snapshots the node list, so traces grow quadratically
    for n in [16, 128, 512] {
        let input = leaves(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| {
                let mut tree = SegmentTree::new(Sum);
                black_box(tree.build(input));
            });
        });
    }
    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for n in [128, 512] {
        let mut tree = SegmentTree::new(Min);
        tree.build(&leaves(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(tree.query(n / 4, 3 * n / 4)));
        });
    }
    group.finish();
}

fn benchmark_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for n in [128, 512] {
        let mut tree = SegmentTree::new(Sum);
        tree.build(&leaves(n));
        let mut value = 0i64;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                value += 1;
                black_box(tree.update(n / 3, value))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_query, benchmark_update);
criterion_main!(benches);
