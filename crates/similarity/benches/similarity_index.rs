//! Benchmarks for the similarity index
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic catalog of TMDB-like size so no data files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::MovieMetadata;
use pipeline::{FeatureBuilder, FeatureMatrix};
use similarity::SimilarityMatrix;

const CATALOG_SIZE: usize = 4800;

fn synthetic_catalog(n: usize) -> Vec<MovieMetadata> {
    let genres = ["Action", "Drama", "Comedy", "Thriller", "Romance", "Horror", "Animation"];
    (0..n)
        .map(|i| MovieMetadata {
            movie_id: i as u32,
            title: format!("Movie {i}"),
            overview: String::new(),
            genres: vec![
                genres[i % genres.len()].to_string(),
                genres[(i / 3) % genres.len()].to_string(),
            ],
            keywords: (0..4).map(|k| format!("kw{}", (i * 7 + k * 13) % 900)).collect(),
            cast: (0..3).map(|c| format!("actor{}", (i * 5 + c * 11) % 1500)).collect(),
            crew: vec![format!("director{}", i % 600)],
            year: None,
            vote_average: None,
        })
        .collect()
}

fn load_features() -> FeatureMatrix {
    FeatureBuilder::new()
        .build(synthetic_catalog(CATALOG_SIZE))
        .expect("Failed to build features")
        .matrix
}

fn bench_build_similarity(c: &mut Criterion) {
    let features = load_features();

    let mut group = c.benchmark_group("similarity_build");
    group.sample_size(10);
    group.bench_function("build_4800", |b| {
        b.iter(|| {
            let index = SimilarityMatrix::build(black_box(&features));
            black_box(index)
        })
    });
    group.finish();
}

fn bench_top_k(c: &mut Criterion) {
    let index = SimilarityMatrix::build(&load_features());

    c.bench_function("top_k_similar_10", |b| {
        b.iter(|| {
            let top = index.top_k_similar(black_box(42), black_box(10)).unwrap();
            black_box(top)
        })
    });
}

fn bench_build_features(c: &mut Criterion) {
    let catalog = synthetic_catalog(CATALOG_SIZE);

    c.bench_function("feature_build_4800", |b| {
        b.iter(|| {
            let features = FeatureBuilder::new().build(black_box(catalog.clone())).unwrap();
            black_box(features)
        })
    });
}

criterion_group!(benches, bench_build_similarity, bench_top_k, bench_build_features);
criterion_main!(benches);
