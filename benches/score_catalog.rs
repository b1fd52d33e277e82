//! Catalog scoring throughput
//!
//! Compares the sequential and rayon paths of the engine on random catalogs
//! of increasing size with one shared query.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crop_suitability::{
    AttributeVector, CatalogEntry, Cosine, ProfileVectorStore, SuitabilityEngine, WeightedDot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIMENSIONALITY: usize = 8;

fn random_vector(rng: &mut StdRng) -> AttributeVector {
    AttributeVector::new((0..DIMENSIONALITY).map(|_| rng.gen_range(1.0..120.0)))
        .expect("random components are positive and finite")
}

fn random_store(size: usize, rng: &mut StdRng) -> ProfileVectorStore {
    let entries = (0..size)
        .map(|i| CatalogEntry::new(format!("crop_{:05}", i), format!("Crop {}", i), random_vector(rng)))
        .collect();
    ProfileVectorStore::with_entries(entries).expect("generated ids are unique")
}

fn bench_sequential_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_catalog");
    let mut rng = StdRng::seed_from_u64(42);
    let query = random_vector(&mut rng);

    for size in [64usize, 1_024, 16_384] {
        let store = random_store(size, &mut rng);
        let sequential = SuitabilityEngine::new(usize::MAX);
        let parallel = SuitabilityEngine::new(1);

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| sequential.score_with_metric(black_box(&query), &store, &Cosine).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| parallel.score_with_metric(black_box(&query), &store, &Cosine).unwrap())
        });
    }

    group.finish();
}

fn bench_weighted_metric(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let query = random_vector(&mut rng);
    let store = random_store(4_096, &mut rng);
    let metric = WeightedDot::new(vec![1.0, 1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0]).unwrap();
    let engine = SuitabilityEngine::default();

    c.bench_function("score_catalog_weighted_4096", |b| {
        b.iter(|| engine.score_with_metric(black_box(&query), &store, &metric).unwrap())
    });
}

criterion_group!(benches, bench_sequential_vs_parallel, bench_weighted_metric);
criterion_main!(benches);
