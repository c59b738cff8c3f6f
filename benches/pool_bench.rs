//! Submission and round-trip throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use taskwell::prelude::*;

fn submit_and_join_batch(pool: &WorkerPool, n: usize) -> usize {
    let handles: Vec<_> = (0..n).map(|i| pool.submit(move || i + 1).unwrap()).collect();
    handles.into_iter().map(|h| h.join().unwrap()).sum()
}

fn bench_round_trip(c: &mut Criterion) {
    let pool = WorkerPool::with_defaults().expect("pool construction");

    let mut group = c.benchmark_group("round_trip");
    for size in [10, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("submit_join", size), size, |b, &size| {
            b.iter(|| submit_and_join_batch(black_box(&pool), black_box(size)))
        });
    }
    group.finish();

    pool.shutdown();
}

fn bench_single_submit(c: &mut Criterion) {
    let pool = WorkerPool::new(
        &Config::builder()
            .num_threads(2)
            .build()
            .expect("valid config"),
    )
    .expect("pool construction");

    c.bench_function("single_submit_join", |b| {
        b.iter(|| pool.submit(|| black_box(21) * 2).unwrap().join().unwrap())
    });

    pool.shutdown();
}

criterion_group!(benches, bench_round_trip, bench_single_submit);
criterion_main!(benches);
