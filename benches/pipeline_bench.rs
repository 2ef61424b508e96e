//! Benchmarks for the upload and chart pipeline
//!
//! Run with: cargo bench

use chartboard::chart;
use chartboard::upload::{decode_upload, UploadedPayload};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_csv(rows: usize) -> Vec<u8> {
    let mut csv = String::from("category,value,weight\n");
    for i in 0..rows {
        csv.push_str(&format!("c{},{},{}\n", i % 17, i as f64 * 0.5, i % 9));
    }
    csv.into_bytes()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [100, 1000, 10000] {
        let payload = UploadedPayload::from_csv_bytes(&create_test_csv(size)).encode();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("decode_upload_{}", size), |b| {
            b.iter(|| decode_upload(black_box(&payload)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [100, 1000, 10000] {
        let payload = UploadedPayload::from_csv_bytes(&create_test_csv(size)).encode();
        let table = decode_upload(&payload).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        for kind in ["bar", "pie", "bubble"] {
            group.bench_function(format!("{}_{}", kind, size), |b| {
                b.iter(|| chart::render(black_box(kind), black_box(&table)).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_render);
criterion_main!(benches);
