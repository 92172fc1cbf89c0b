use data_loader::load_metadata;
use std::path::Path;
use std::time::Instant;

fn main() {
    let movies_path = Path::new("data/tmdb_5000_movies.csv");
    let credits_path = Path::new("data/tmdb_5000_credits.csv");

    println!("Loading TMDB 5000 catalog...\n");

    let start = Instant::now();
    let metadata = load_metadata(movies_path, credits_path)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let keywords: usize = metadata.iter().map(|m| m.keywords.len()).sum();
    let directors: usize = metadata.iter().map(|m| m.crew.len()).sum();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", metadata.len());
    println!("Keywords: {}", keywords);
    println!("Director credits: {}", directors);
    println!("\nPerformance: {:.0} rows/second",
             metadata.len() as f64 / elapsed.as_secs_f64());
}
