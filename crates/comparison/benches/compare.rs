//! Benchmarks for guess comparison
//!
//! Run with: cargo bench --package comparison
//!
//! Compares every pair drawn from the sample catalog shipped in data/.

use catalog::MovieCatalog;
use comparison::compare;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn load_test_catalog() -> MovieCatalog {
    let path = Path::new("../../data/movies.json");
    MovieCatalog::load_from_file(path).expect("Failed to load sample catalog")
}

fn bench_compare_all_pairs(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let ids: Vec<_> = catalog.ids().collect();

    c.bench_function("compare_all_pairs", |b| {
        b.iter(|| {
            for &guess_id in &ids {
                for &target_id in &ids {
                    let guess = catalog.get_by_id(guess_id).unwrap();
                    let target = catalog.get_by_id(target_id).unwrap();
                    black_box(compare(black_box(guess), black_box(target)));
                }
            }
        })
    });
}

fn bench_compare_self(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let first = catalog.ids().next().expect("sample catalog is empty");
    let movie = catalog.get_by_id(first).unwrap();

    c.bench_function("compare_self", |b| {
        b.iter(|| black_box(compare(black_box(movie), black_box(movie))))
    });
}

criterion_group!(benches, bench_compare_all_pairs, bench_compare_self);
criterion_main!(benches);
