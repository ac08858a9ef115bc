// Rate Limiter Benchmarks
//
// Measures admission overhead in the uncontended case and throughput with
// many tasks sharing one limiter.
//
// Usage:
//   cargo bench --bench rate_limiter

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use crpt_client::rate_limit::RateLimiter;

fn bench_uncontended_acquire(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("acquire_uncontended", |b| {
        b.iter(|| {
            rt.block_on(async {
                // A huge limit over a tiny window never blocks.
                let limiter = RateLimiter::new(Duration::from_millis(1), 1_000_000).unwrap();
                limiter.run_guarded(|| async {}).await.unwrap();
            })
        })
    });
}

fn bench_shared_limiter_throughput(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("shared_limiter");

    for tasks in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &tasks, |b, &tasks| {
            b.iter(|| {
                rt.block_on(async {
                    let limiter =
                        RateLimiter::new(Duration::from_millis(1), 1_000_000).unwrap();
                    let handles: Vec<_> = (0..tasks)
                        .map(|_| {
                            let limiter = limiter.clone();
                            tokio::spawn(
                                async move { limiter.run_guarded(|| async {}).await },
                            )
                        })
                        .collect();
                    for handle in handles {
                        handle.await.unwrap().unwrap();
                    }
                })
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_uncontended_acquire,
    bench_shared_limiter_throughput
);
criterion_main!(benches);
