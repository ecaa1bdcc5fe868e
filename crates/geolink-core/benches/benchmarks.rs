// crates/geolink-core/benches/benchmarks.rs
use criterion::{criterion_group, criterion_main, Criterion};
use geolink_core::prelude::*;
use geolink_core::KeyedRecord;
use std::hint::black_box;

fn synthetic_haystack(n: usize) -> Haystack {
    let records = (0..n).map(|i| {
        LocalityRecord::new(
            i.to_string(),
            format!("Country{}", i % 50),
            format!("Province{}", i % 400),
            format!("City{i}"),
        )
    });
    Haystack::from_records(records, FoldMode::Lowercase)
}

fn bench_matcher(c: &mut Criterion) {
    let haystack = synthetic_haystack(5_000);
    let needle = KeyedRecord::new(
        LocalityRecord::new("bench", "Country7", "Province123", "City4123x"),
        FoldMode::Lowercase,
    );

    let extended = Matcher::new(ComparisonPolicy::WithinDistance { threshold: 4 });
    let simple = Matcher::new(ComparisonPolicy::ExactOnly);

    c.bench_function("extended_scan_5k", |b| {
        b.iter(|| extended.match_needle(black_box(&needle), black_box(&haystack)))
    });
    c.bench_function("simple_scan_5k", |b| {
        b.iter(|| simple.match_needle(black_box(&needle), black_box(&haystack)))
    });
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("edit_distance_keys", |b| {
        b.iter(|| {
            edit_distance(
                black_box("france ile-de-france paris"),
                black_box("france iledefrance parris"),
            )
        })
    });
}

criterion_group!(benches, bench_matcher, bench_distance);
criterion_main!(benches);
