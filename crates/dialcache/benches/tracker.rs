use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dialcache::RecencyTracker;

fn bench_promote_hot(c: &mut Criterion) {
    let mut group = c.benchmark_group("promote_hot");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("promote_within_capacity", |b| {
        let mut tracker = RecencyTracker::new(64);
        for key in 0..64u64 {
            tracker.promote(key);
        }

        let mut counter = 0u64;
        b.iter(|| {
            tracker.promote(black_box(counter % 64));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_promote_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("promote_evicting");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("promote_new_key_capacity_5", |b| {
        let mut tracker = RecencyTracker::new(5);

        let mut counter = 0u64;
        b.iter(|| {
            // Every key is new, so every promote evicts
            tracker.promote(black_box(counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    group.sample_size(50);

    group.bench_function("walk_1000", |b| {
        let mut tracker = RecencyTracker::new(1000);
        for key in 0..1000u64 {
            tracker.promote(key);
        }

        b.iter(|| black_box(tracker.iter().sum::<u64>()));
    });

    group.finish();
}

criterion_group!(benches, bench_promote_hot, bench_promote_evicting, bench_iter);
criterion_main!(benches);
