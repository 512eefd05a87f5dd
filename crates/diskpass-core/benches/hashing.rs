//! Benchmarks for content hashing of staged disks.
//!
//! Run with: cargo bench -p diskpass-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diskpass_core::pipeline::Hasher;

/// A 5.25" DOS 3.3 disk image is 35 tracks x 16 sectors x 256 bytes.
const DSK_SIZE: usize = 143_360;

fn disk_bytes() -> Vec<u8> {
    (0..DSK_SIZE).map(|i| (i * 31 % 256) as u8).collect()
}

fn benchmark_content_hash_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("disk.dsk");
    std::fs::write(&path, disk_bytes()).expect("write fixture");

    c.bench_function("content_hash_dsk_file", |b| {
        b.iter(|| {
            let _ = Hasher::content_hash(black_box(&path));
        })
    });
}

fn benchmark_content_hash_bytes(c: &mut Criterion) {
    let bytes = disk_bytes();

    c.bench_function("content_hash_dsk_bytes", |b| {
        b.iter(|| {
            let _ = Hasher::content_hash_from_bytes(black_box(&bytes));
        })
    });
}

criterion_group!(
    benches,
    benchmark_content_hash_file,
    benchmark_content_hash_bytes
);
criterion_main!(benches);
