//! Strata - Performance Benchmarks
//! Measures throughput of core engine operations using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use strata::config::Config;
use strata::engine::memtable::MemTable;
use strata::engine::segment::{self, SegmentWriter};
use strata::engine::StorageEngine;
use strata::types::Entry;

fn bench_memtable_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("memtable");

    // Benchmark: Sequential inserts
    group.bench_function("insert_1000", |b| {
        b.iter(|| {
            let mut table = MemTable::new();
            for i in 0..1000 {
                let key = format!("key_{:06}", i);
                let value = format!("value_{:06}", i);
                table.insert(black_box(key), black_box(value));
            }
        });
    });

    // Benchmark: Point lookups
    group.bench_function("get_hit", |b| {
        let mut table = MemTable::new();
        for i in 0..1000 {
            table.insert(format!("key_{:06}", i), format!("value_{:06}", i));
        }
        b.iter(|| {
            black_box(table.get("key_000500"));
        });
    });

    // Benchmark: Point lookup miss
    group.bench_function("get_miss", |b| {
        let mut table = MemTable::new();
        for i in 0..1000 {
            table.insert(format!("key_{:06}", i), format!("value_{:06}", i));
        }
        b.iter(|| {
            black_box(table.get("nonexistent_key"));
        });
    });

    group.finish();
}

fn bench_segment_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sst-1.json");
    let mut writer = SegmentWriter::create(&path).unwrap();
    for i in 0..1000 {
        let entry = Entry::new(format!("key_{:06}", i), format!("value_{:06}", i));
        writer.write_entry(&entry).unwrap();
    }
    writer.sync().unwrap();

    // Linear scan: hit cost depends on where the key sits in the file.
    group.bench_function("find_key_first", |b| {
        b.iter(|| {
            black_box(segment::find_key(&path, "key_000000").unwrap());
        });
    });

    group.bench_function("find_key_last", |b| {
        b.iter(|| {
            black_box(segment::find_key(&path, "key_000999").unwrap());
        });
    });

    group.bench_function("find_key_miss", |b| {
        b.iter(|| {
            black_box(segment::find_key(&path, "definitely_not_here").unwrap());
        });
    });

    group.finish();
}

fn bench_engine_e2e(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_e2e");

    for size in [100, 500, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("put_get_cycle", size),
            size,
            |b, &size| {
                b.iter(|| {
                    let dir = tempfile::tempdir().unwrap();
                    let config = Config::new(dir.path().join("db")).with_flush_threshold(250);
                    let mut engine = StorageEngine::open(config).unwrap();

                    for i in 0..size {
                        let key = format!("key_{:06}", i);
                        let value = format!("value_{:06}", i);
                        engine.put(key, value).unwrap();
                    }

                    for i in 0..size {
                        let key = format!("key_{:06}", i);
                        black_box(engine.get(&key).unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_memtable_operations,
    bench_segment_scan,
    bench_engine_e2e
);
criterion_main!(benches);
