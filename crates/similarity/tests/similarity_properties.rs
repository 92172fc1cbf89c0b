//! End-to-end checks: metadata -> features -> similarity -> top-k.

use data_loader::MovieMetadata;
use pipeline::{FeatureBuilder, FeatureSet};
use similarity::{SimilarityMatrix, DEFAULT_K};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn movie(id: u32, genres: &[&str], keywords: &[&str], cast: &[&str], crew: &[&str]) -> MovieMetadata {
    MovieMetadata {
        movie_id: id,
        title: format!("Movie {id}"),
        overview: String::new(),
        genres: owned(genres),
        keywords: owned(keywords),
        cast: owned(cast),
        crew: owned(crew),
        year: None,
        vote_average: None,
    }
}

fn build(metadata: Vec<MovieMetadata>) -> (FeatureSet, SimilarityMatrix) {
    let features = FeatureBuilder::new().build(metadata).unwrap();
    let index = SimilarityMatrix::build(&features.matrix);
    (features, index)
}

fn sample_catalog() -> Vec<MovieMetadata> {
    vec![
        movie(1, &["Action", "Adventure"], &["space", "alien"], &["Sam Worthington"], &["James Cameron"]),
        movie(2, &["Action", "Thriller"], &["heist"], &["Tom Hardy"], &["Christopher Nolan"]),
        movie(3, &["Science Fiction"], &["space", "alien"], &["Sigourney Weaver"], &["Ridley Scott"]),
        movie(4, &["Romance", "Drama"], &["wedding"], &["Emma Stone"], &[]),
        movie(5, &[], &[], &[], &[]),
        movie(6, &["Drama"], &["wedding", "family"], &["Emma Stone"], &["Greta Gerwig"]),
        movie(7, &["Action", "Adventure"], &["space"], &["Sam Worthington"], &["James Cameron"]),
    ]
}

#[test]
fn test_identical_movies_rank_first() {
    let (_, index) = build(vec![
        movie(1, &["Action"], &[], &["X"], &["D1"]),
        movie(2, &["Action"], &[], &["X"], &["D1"]),
        movie(3, &["Romance"], &[], &["Y"], &["D2"]),
    ]);

    let ab = index.get(0, 1).unwrap();
    let ac = index.get(0, 2).unwrap();
    assert!(ab > ac);
    assert!((ab - 1.0).abs() < 1e-6);
    assert_eq!(index.top_k_similar(0, 1).unwrap(), vec![1]);
}

#[test]
fn test_matrix_properties() {
    let (features, index) = build(sample_catalog());
    let n = features.len();
    assert_eq!(index.len(), n);
    assert!(index.is_symmetric(0.0));

    for i in 0..n {
        let zero_row = features.matrix.row(i).unwrap().is_zero();
        let expected = if zero_row { 0.0 } else { 1.0 };
        assert_eq!(index.get(i, i), Some(expected));
        for j in 0..n {
            let s = index.get(i, j).unwrap();
            assert!((0.0..=1.0).contains(&s), "s[{i}][{j}] = {s}");
        }
    }
}

#[test]
fn test_top_k_contract() {
    let (features, index) = build(sample_catalog());
    let n = features.len();

    for row in 0..n {
        for k in [0, 1, 3, DEFAULT_K] {
            let top = index.top_k_scored(row, k).unwrap();
            assert_eq!(top.len(), k.min(n - 1));
            assert!(top.iter().all(|m| m.row != row));
            for pair in top.windows(2) {
                assert!(
                    pair[0].score > pair[1].score
                        || (pair[0].score == pair[1].score && pair[0].row < pair[1].row)
                );
            }
        }
    }
}

#[test]
fn test_shared_terms_drive_neighbours() {
    let (_, index) = build(sample_catalog());
    // Movie 7 shares genres, cast and director with movie 1
    assert_eq!(index.top_k_similar(6, 1).unwrap(), vec![0]);
    // Movie 6 shares "drama", "wedding" and "emma stone" with movie 4
    assert_eq!(index.top_k_similar(5, 1).unwrap(), vec![3]);
}

#[test]
fn test_rebuild_is_identical() {
    let (_, first) = build(sample_catalog());
    let (_, second) = build(sample_catalog());
    assert_eq!(first, second);
}
