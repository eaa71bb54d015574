use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use prodnum::{AllocatorConfig, InMemoryNumberStore, LockNumberAllocator, MAX_WIDTH};
use std::thread::scope;
use std::time::Instant;

// Allocations per benchmark iteration (per-thread for multi-threaded). Kept
// well under the 9-digit capacity so no iteration ever hits Overflow.
const TOTAL_ALLOCS: usize = 4096;

fn wide_allocator(store: InMemoryNumberStore) -> LockNumberAllocator<InMemoryNumberStore> {
    LockNumberAllocator::with_config(
        store,
        AllocatorConfig {
            width: MAX_WIDTH,
            ..AllocatorConfig::default()
        },
    )
    .expect("MAX_WIDTH is a valid width")
}

/// Benchmarks uncontended sequential allocation.
fn bench_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate/sequential");
    group.throughput(Throughput::Elements(TOTAL_ALLOCS as u64));

    group.bench_function(format!("elems/{TOTAL_ALLOCS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let store = InMemoryNumberStore::new();
                let allocator = wide_allocator(store.clone());
                for _ in 0..TOTAL_ALLOCS {
                    let number = allocator
                        .allocate_next(|n| store.insert(n))
                        .expect("store never overflows at MAX_WIDTH");
                    black_box(number);
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks guard contention across threads.
fn bench_contended(c: &mut Criterion) {
    let threads = std::thread::available_parallelism().map_or(4, usize::from);

    let mut group = c.benchmark_group("allocate/contended");
    group.throughput(Throughput::Elements((TOTAL_ALLOCS * threads) as u64));

    group.bench_function(format!("threads/{threads}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let store = InMemoryNumberStore::new();
                let allocator = wide_allocator(store.clone());
                scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            for _ in 0..TOTAL_ALLOCS {
                                let number = allocator
                                    .allocate_next(|n| store.insert(n))
                                    .expect("store never overflows at MAX_WIDTH");
                                black_box(number);
                            }
                        });
                    }
                });
            }

            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sequential, bench_contended);
criterion_main!(benches);
