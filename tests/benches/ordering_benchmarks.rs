//! # Flush-Ordering Benchmarks
//!
//! Compares the dependency-graph path against the baseline sort on
//! cascade-delete workloads, the shape that made comparison-based ordering
//! the dominant cost of large flushes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use flush_ordering::{BatchScheduler, FlushConfig, FlushOrderingService, PendingOperation};
use flush_tests::generators::{cascade_delete_batch, shuffled, Payload};

fn fast_service() -> FlushOrderingService {
    FlushOrderingService::with_config(FlushConfig {
        size_threshold: 1,
        ..Default::default()
    })
}

fn baseline_service() -> FlushOrderingService {
    FlushOrderingService::with_config(FlushConfig {
        use_fast_path: false,
        ..Default::default()
    })
}

fn workload(instances: usize) -> Vec<PendingOperation<Payload>> {
    shuffled(cascade_delete_batch(instances, 3), 42)
}

fn bench_ordering_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush-ordering");

    for instances in [16usize, 64, 256] {
        let batch = workload(instances);
        group.throughput(Throughput::Elements(batch.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("fast_path", batch.len()),
            &batch,
            |b, batch| {
                let service = fast_service();
                b.iter(|| black_box(service.schedule_batch(batch.clone()).unwrap()))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("baseline", batch.len()),
            &batch,
            |b, batch| {
                let service = baseline_service();
                b.iter(|| black_box(service.schedule_batch(batch.clone()).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ordering_paths);
criterion_main!(benches);
