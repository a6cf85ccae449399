//! Criterion benches for full solves, mirroring the CLI bench grid.
//!
//! Graph sizes stay small (n ≤ 12) so each sample finishes quickly; the
//! sequential/parallel pair shows the bin-parallel overhead at low k.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cuckatoo::api::*;

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    let header = [0u8; 32];
    for &(n, k) in &[(8u32, 2u64), (10, 4), (12, 8)] {
        for &threads in &[1usize, 4] {
            let cfg = SolveCfg {
                threads,
                max_starts_per_bin: Some(64),
                time_budget: Some(Duration::from_secs(2)),
                ..SolveCfg::new(n, k)
            };
            let id = BenchmarkId::new(format!("n{n}_k{k}"), format!("t{threads}"));
            group.bench_with_input(id, &cfg, |b, cfg| {
                b.iter(|| solve(&header, cfg).expect("valid config"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
