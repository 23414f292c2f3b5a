//! Criterion benchmarks for zonotope support, vertices and order reduction.
//! Focus sizes: p in {2, 6, 10, 14} generators in the plane, {6, 10, 16} in R^3;
//! reduction in R^8.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p lazysets

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use lazysets::prelude::*;

fn zono(dim: usize, generators: usize, seed: u64) -> Zonotope<f64> {
    let cfg = ZonoRandCfg {
        dim,
        generators,
        ..ZonoRandCfg::default()
    };
    draw_zonotope(cfg, ReplayToken::new(seed))
}

fn bench_zonotope(c: &mut Criterion) {
    let mut group = c.benchmark_group("zonotope");
    for &p in &[2usize, 6, 10, 14] {
        group.bench_with_input(BenchmarkId::new("support_vector", p), &p, |b, &p| {
            let z = zono(2, p, 41);
            let d = DVector::from_vec(vec![0.3, -1.0]);
            b.iter(|| {
                let _sv = z.support_vector(&d).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("vertices_2d", p), &p, |b, &p| {
            b.iter_batched(
                || zono(2, p, 42),
                |z| {
                    let _vs = z.vertices().unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }

    for &p in &[6usize, 10, 16] {
        group.bench_with_input(BenchmarkId::new("vertices_3d", p), &p, |b, &p| {
            b.iter_batched(
                || zono(3, p, 44),
                |z| {
                    let _vs = z.vertices().unwrap();
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("contains_wide_3d", p), &p, |b, &p| {
            let z = zono(3, p, 45);
            let x = z.support_vector(&DVector::from_vec(vec![0.2, -0.7, 1.0])).unwrap();
            b.iter(|| {
                let _inside = z.contains(&x).unwrap();
            })
        });
    }

    for &p in &[16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("reduce_order_8d", p), &p, |b, &p| {
            b.iter_batched(
                || zono(8, p, 43),
                |z| {
                    let _r = z.reduce_order(2.0).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_zonotope);
criterion_main!(benches);
