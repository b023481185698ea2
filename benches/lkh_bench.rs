//! Criterion benchmarks for u-lkh.
//!
//! Uses deterministic pseudo-random Euclidean instances so runs are
//! comparable across machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_lkh::bound::{AlphaNearness, MinimumOneTree, SubgradientBound, SubgradientConfig};
use u_lkh::matrix::WeightMatrix;
use u_lkh::pipeline::{Lkh, LkhConfig};
use u_lkh::search::TwoOpt;
use u_lkh::tabu::{TabuSearch, TabuSearchConfig};
use u_lkh::tour::Fingerprinter;

// ===========================================================================
// Instances
// ===========================================================================

fn random_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect()
}

fn random_matrix(n: usize) -> WeightMatrix {
    WeightMatrix::from_points(&random_points(n, 42))
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    for &n in &[100usize, 1_000, 10_000] {
        let tour: Vec<usize> = (0..n).rev().collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tour, |b, t| {
            let mut fp = Fingerprinter::default();
            b.iter(|| black_box(fp.compute(black_box(t))))
        });
    }
    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounds");
    group.sample_size(10);
    for &n in &[50usize, 100, 200] {
        let m = random_matrix(n);
        group.bench_with_input(BenchmarkId::new("one_tree_alpha", n), &m, |b, m| {
            b.iter(|| {
                let tree = MinimumOneTree::build(black_box(m)).ok();
                black_box(tree.map(|t| AlphaNearness::build(m, &t)))
            })
        });
        let config = SubgradientConfig::default().with_max_iterations(50);
        group.bench_with_input(BenchmarkId::new("subgradient", n), &(m, config), |b, (m, c)| {
            b.iter(|| black_box(SubgradientBound::run(black_box(m), black_box(c))))
        });
    }
    group.finish();
}

fn bench_tabu_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_two_opt");
    group.sample_size(10);
    for &n in &[50usize, 100] {
        let m = random_matrix(n);
        let config = TabuSearchConfig::default().with_max_rounds(10).with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(m, config), |b, (m, c)| {
            b.iter(|| {
                let result = TabuSearch::run(black_box(m), (0..n).collect(), TwoOpt::new(), c);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    for &n in &[50usize, 100] {
        let points = random_points(n, 7);
        let config = LkhConfig::default()
            .with_subgradient(SubgradientConfig::default().with_max_iterations(50))
            .with_tabu(TabuSearchConfig::default().with_max_rounds(10).with_seed(7));
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(points, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut lkh = Lkh::from_points(black_box(p));
                    black_box(lkh.solve(black_box(c)))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_fingerprint,
    bench_bounds,
    bench_tabu_two_opt,
    bench_pipeline
);
criterion_main!(benches);
