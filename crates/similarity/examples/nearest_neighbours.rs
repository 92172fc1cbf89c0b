//! Example: Build the similarity index and list neighbours of one movie
//!
//! Run with: cargo run --package similarity --example nearest_neighbours -- "Avatar"
//!
//! This example shows how to:
//! 1. Load the TMDB 5000 metadata and credits tables
//! 2. Build tf-idf features over the tag strings
//! 3. Build the cosine similarity matrix
//! 4. Query the top 5 neighbours of a title

use data_loader::load_metadata;
use pipeline::FeatureBuilder;
use similarity::SimilarityMatrix;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let title = std::env::args().nth(1).unwrap_or_else(|| "Avatar".to_string());

    println!("=== Nearest Neighbours Example ===\n");

    let start = Instant::now();
    let metadata = load_metadata(
        Path::new("data/tmdb_5000_movies.csv"),
        Path::new("data/tmdb_5000_credits.csv"),
    )?;
    println!("Loaded {} movies in {:?}", metadata.len(), start.elapsed());

    let start = Instant::now();
    let features = FeatureBuilder::new().build(metadata)?;
    println!(
        "Built {} x {} features in {:?}",
        features.matrix.n_rows(),
        features.matrix.n_cols(),
        start.elapsed()
    );

    let start = Instant::now();
    let index = SimilarityMatrix::build(&features.matrix);
    println!("Built similarity matrix in {:?}\n", start.elapsed());

    let Some(row) = features.records.iter().position(|r| r.title == title) else {
        println!("No movie titled {title:?}");
        return Ok(());
    };

    println!("Top 5 for {:?} (tags: {})", title, features.records[row].tags);
    for (rank, m) in index.top_k_scored(row, 5)?.iter().enumerate() {
        println!(
            "  {}. {} (score: {:.3})",
            rank + 1,
            features.records[m.row].title,
            m.score
        );
    }

    Ok(())
}
