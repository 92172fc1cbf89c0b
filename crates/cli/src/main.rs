mod repl;

use anyhow::{Context, Result};
use catalog_client::CatalogClient;
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::MovieId;
use rand::Rng;
use server::{
    Artifact, MovieRecommendation, Recommender, DEFAULT_SUGGESTIONS, DEFAULT_SUGGESTION_CUTOFF,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;

/// ReelMatch - content-based movie recommendations
#[derive(Parser)]
#[command(name = "reel-match")]
#[command(about = "Movie recommendations from tf-idf similarity over genres, keywords, cast and directors", long_about = None)]
struct Cli {
    /// Path to the built artifact
    #[arg(short, long, default_value = "data/artifact.bin")]
    artifact: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the artifact from the raw metadata and credits tables
    Build {
        /// Movie metadata table (CSV)
        #[arg(long, default_value = "data/tmdb_5000_movies.csv")]
        movies: PathBuf,

        /// Credits table (CSV)
        #[arg(long, default_value = "data/tmdb_5000_credits.csv")]
        credits: PathBuf,

        /// Where to write the artifact (defaults to --artifact)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Recommend movies similar to a given movie
    Recommend {
        /// Exact title (first match in catalog order)
        #[arg(long, conflicts_with = "movie_id", required_unless_present = "movie_id")]
        title: Option<String>,

        /// Catalog movie id
        #[arg(long)]
        movie_id: Option<MovieId>,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Fetch poster and rating from the catalog API
        #[arg(long)]
        details: bool,
    },

    /// Search titles (case-insensitive substring) with close-match suggestions
    Search {
        #[arg(long)]
        query: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show the genre distribution of the catalog
    Stats {
        /// Number of genres to show
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// List popular movies from the catalog API
    Popular {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Interactive session with a watchlist
    Interactive,

    /// Measure query latency
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "1000")]
        queries: usize,

        /// Number of concurrent workers
        #[arg(long, default_value = "8")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            movies,
            credits,
            output,
        } => handle_build(&movies, &credits, output.as_deref().unwrap_or(&cli.artifact))?,
        Commands::Recommend {
            title,
            movie_id,
            limit,
            details,
        } => {
            let recommender = load_recommender(&cli.artifact)?;
            handle_recommend(&recommender, title, movie_id, limit, details).await?
        }
        Commands::Search { query, limit } => {
            handle_search(&load_recommender(&cli.artifact)?, &query, limit)
        }
        Commands::Stats { top } => handle_stats(&load_recommender(&cli.artifact)?, top),
        Commands::Popular { limit } => handle_popular(limit).await?,
        Commands::Interactive => repl::run(load_recommender(&cli.artifact)?)?,
        Commands::Benchmark {
            queries,
            concurrent,
        } => handle_benchmark(load_recommender(&cli.artifact)?, queries, concurrent).await?,
    }

    Ok(())
}

/// Load the artifact once and wrap it for querying
fn load_recommender(path: &Path) -> Result<Recommender> {
    println!("Loading artifact from {}...", path.display());
    let start = Instant::now();
    let artifact = Artifact::load(path)
        .with_context(|| format!("Failed to load artifact {}", path.display()))?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        artifact.len(),
        start.elapsed()
    );
    Ok(Recommender::new(artifact))
}

/// Handle the 'build' command
fn handle_build(movies: &Path, credits: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    let artifact =
        Artifact::build_from_files(movies, credits).context("Failed to build artifact")?;
    artifact
        .save(output)
        .with_context(|| format!("Failed to save artifact to {}", output.display()))?;

    println!(
        "{} Built artifact for {} movies in {:?} -> {}",
        "✓".green(),
        artifact.len(),
        start.elapsed(),
        output.display()
    );
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    recommender: &Recommender,
    title: Option<String>,
    movie_id: Option<MovieId>,
    limit: usize,
    details: bool,
) -> Result<()> {
    let result = match (&title, movie_id) {
        (_, Some(id)) => recommender.recommend_by_id(id, limit),
        (Some(title), None) => recommender.recommend_by_title(title, limit),
        (None, None) => anyhow::bail!("Pass --title or --movie-id"),
    };

    let recommendations = match result {
        Ok(recs) => recs,
        Err(e) if e.is_recoverable() => {
            println!("{} {}", "✗".red(), e);
            if let Some(title) = &title {
                print_suggestions(recommender, title);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(title) = &title {
        let matches = recommender.rows_for_title(title).len();
        if matches > 1 {
            println!(
                "{} {} movies are titled '{}'; using the first. Pass --movie-id to pick another.",
                "!".yellow(),
                matches,
                title
            );
        }
    }

    print_recommendations(&recommendations);

    if details {
        print_details(&recommendations).await;
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(recommender: &Recommender, query: &str, limit: usize) {
    let matches = recommender.search_titles(query, limit);
    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  no titles contain '{}'", query);
    }
    for movie in matches {
        println!(
            "{}: {} ({}) [{}]",
            movie.movie_id,
            movie.title,
            year_label(movie.year),
            movie.genres.join(", ")
        );
    }
    print_suggestions(recommender, query);
}

/// Handle the 'stats' command
fn handle_stats(recommender: &Recommender, top: usize) {
    println!("{}", "Genre distribution:".bold().blue());
    print_bar_chart(&recommender.genre_distribution(), top);
}

/// Handle the 'popular' command
async fn handle_popular(limit: usize) -> Result<()> {
    let client = CatalogClient::from_env().context("Catalog API is not configured")?;
    let movies = client
        .popular_movies(1)
        .await
        .context("Failed to fetch popular movies")?;

    println!("{}", "Popular movies:".bold().blue());
    for (rank, movie) in movies.iter().take(limit).enumerate() {
        println!(
            "{}. {} - Rating: {}/10",
            (rank + 1).to_string().green(),
            movie.title,
            movie
                .vote_average
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "n/a".to_string())
        );
        if let Some(path) = &movie.poster_path {
            println!("   Poster: {}", client.poster_url(path));
        }
        println!("   {}", client.movie_page_url(movie.id));
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(recommender: Recommender, queries: usize, concurrent: usize) -> Result<()> {
    let n = recommender.catalog().len();
    anyhow::ensure!(n > 0, "Artifact has no movies");
    anyhow::ensure!(queries > 0, "Need at least one query");

    let mut rng = rand::rng();
    let rows: Vec<usize> = (0..queries).map(|_| rng.random_range(0..n)).collect();

    let workers = concurrent.max(1);
    let chunk_size = queries.div_ceil(workers);
    let wall = Instant::now();

    let mut handles = vec![];
    for chunk in rows.chunks(chunk_size) {
        let recommender = recommender.clone();
        let chunk = chunk.to_vec();
        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .into_iter()
                .map(|row| -> Result<Duration> {
                    let start = Instant::now();
                    recommender.recommend(row, 10)?;
                    Ok(start.elapsed())
                })
                .collect::<Result<Vec<Duration>>>()
        }));
    }

    let mut timings = vec![];
    for handle in handles {
        timings.extend(handle.await??);
    }
    let wall_time = wall.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];

    println!("Benchmark results ({} queries, {} workers):", queries, workers);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", total / timings.len() as u32);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} queries/second",
        queries as f64 / wall_time.as_secs_f64()
    );
    Ok(())
}

pub(crate) fn year_label(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string())
}

pub(crate) fn print_recommendations(recommendations: &[MovieRecommendation]) {
    println!("{}", "Movies you should watch:".bold().blue());
    if recommendations.is_empty() {
        println!("  no other movies in the catalog");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.title,
            year_label(rec.year),
            rec.genres.join(", "),
            rec.score
        );
    }
}

pub(crate) fn print_suggestions(recommender: &Recommender, query: &str) {
    let suggestions =
        recommender.suggest_titles(query, DEFAULT_SUGGESTIONS, DEFAULT_SUGGESTION_CUTOFF);
    if suggestions.is_empty() {
        println!("  no close matches for '{}'", query);
    } else {
        println!("Did you mean: {}", suggestions.join(" | ").italic());
    }
}

pub(crate) fn print_bar_chart(counts: &[(String, usize)], top: usize) {
    const WIDTH: usize = 40;
    let Some(max) = counts.iter().map(|(_, c)| *c).max() else {
        println!("  (nothing to show)");
        return;
    };
    let label_width = counts.iter().take(top).map(|(g, _)| g.len()).max().unwrap_or(0);
    for (genre, count) in counts.iter().take(top) {
        let bar = "█".repeat((count * WIDTH).div_ceil(max.max(1)));
        println!("{:>label_width$} {} {}", genre, bar.cyan(), count);
    }
}

/// Poster and rating per recommendation; API failures only cost the display
async fn print_details(recommendations: &[MovieRecommendation]) {
    let client = match CatalogClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            warn!("Catalog API unavailable, skipping details: {}", e);
            return;
        }
    };

    println!("{}", "Details:".bold().blue());
    for rec in recommendations {
        match client.movie_details(rec.movie_id).await {
            Ok(details) => {
                let rating = details
                    .vote_average
                    .map(|r| format!("{:.1}", r))
                    .unwrap_or_else(|| "n/a".to_string());
                println!("• {} - Rating: {}/10", rec.title, rating);
                if let Some(path) = details.poster_path {
                    println!("   Poster: {}", client.poster_url(&path));
                }
            }
            Err(e) => {
                warn!("No details for {} ({}): {}", rec.title, rec.movie_id, e);
                println!("• {} - Rating: n/a", rec.title);
            }
        }
        println!("   {}", client.movie_page_url(rec.movie_id));
    }
}
