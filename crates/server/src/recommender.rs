//! # Recommender
//!
//! Read-only query surface over a loaded artifact:
//! 1. Resolve a title or movie id to a catalog row
//! 2. Read that row's top-k neighbours from the similarity matrix
//! 3. Attach display fields from the catalog
//!
//! Every method is a pure function of the artifact and its arguments. The
//! recommender is cheap to clone and safe to share across threads.

use crate::artifact::Artifact;
use crate::error::{EngineError, Result};
use crate::fuzzy;
use data_loader::{Catalog, MovieId, MovieRecord, RowIndex};
use serde::{Deserialize, Serialize};
use similarity::{ScoredMatch, SimilarityMatrix};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of title suggestions
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Minimum similarity for a title suggestion
pub const DEFAULT_SUGGESTION_CUTOFF: f64 = 0.6;

/// A recommended movie with its display fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub row: RowIndex,
    pub movie_id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub year: Option<u16>,
    pub vote_average: Option<f32>,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct Recommender {
    artifact: Arc<Artifact>,
}

impl Recommender {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
        }
    }

    /// Share an already-loaded artifact
    pub fn from_shared(artifact: Arc<Artifact>) -> Self {
        Self { artifact }
    }

    pub fn catalog(&self) -> &Catalog {
        self.artifact.catalog()
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        self.artifact.similarity()
    }

    /// Row of the first movie (in table order) with exactly this title.
    ///
    /// Titles are not unique; use `rows_for_title` to see every match or
    /// `resolve_movie_id` for an unambiguous key.
    pub fn resolve_title(&self, title: &str) -> Result<RowIndex> {
        self.rows_for_title(title)
            .first()
            .copied()
            .ok_or_else(|| EngineError::TitleNotFound(title.to_string()))
    }

    /// Every row with exactly this title, ascending
    pub fn rows_for_title(&self, title: &str) -> &[RowIndex] {
        self.catalog().rows_with_title(title)
    }

    pub fn resolve_movie_id(&self, movie_id: MovieId) -> Result<RowIndex> {
        self.catalog()
            .row_for_id(movie_id)
            .ok_or(EngineError::MovieIdNotFound(movie_id))
    }

    /// The `min(k, N-1)` movies most similar to `row`, best first
    #[instrument(skip(self))]
    pub fn recommend(&self, row: RowIndex, k: usize) -> Result<Vec<MovieRecommendation>> {
        let matches = self.similarity().top_k_scored(row, k)?;
        debug!("{} neighbours for row {}", matches.len(), row);
        Ok(matches.into_iter().filter_map(|m| self.describe(m)).collect())
    }

    pub fn recommend_by_title(&self, title: &str, k: usize) -> Result<Vec<MovieRecommendation>> {
        let row = self.resolve_title(title)?;
        self.recommend(row, k)
    }

    pub fn recommend_by_id(&self, movie_id: MovieId, k: usize) -> Result<Vec<MovieRecommendation>> {
        let row = self.resolve_movie_id(movie_id)?;
        self.recommend(row, k)
    }

    fn describe(&self, m: ScoredMatch) -> Option<MovieRecommendation> {
        let movie = self.catalog().get_movie(m.row)?;
        Some(MovieRecommendation {
            row: m.row,
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            year: movie.year,
            vote_average: movie.vote_average,
            score: m.score,
        })
    }

    /// Movies whose title contains `query`, ignoring case, in table order.
    ///
    /// An empty query matches everything.
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&MovieRecord> {
        let needle = query.to_lowercase();
        self.catalog()
            .movies()
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Up to `n` distinct titles closest to `query`, best first.
    ///
    /// Closeness is normalised edit similarity on lower-cased titles; titles
    /// scoring below `cutoff` are dropped. Equal scores keep table order.
    pub fn suggest_titles(&self, query: &str, n: usize, cutoff: f64) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        let mut scored: Vec<(f64, &str)> = self
            .catalog()
            .movies()
            .iter()
            .filter(|m| seen.insert(m.title.as_str()))
            .map(|m| (fuzzy::similarity(&needle, &m.title.to_lowercase()), m.title.as_str()))
            .filter(|&(score, _)| score >= cutoff)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(n);
        scored.into_iter().map(|(_, title)| title.to_string()).collect()
    }

    /// Movies per genre across the catalog, most common first
    pub fn genre_distribution(&self) -> Vec<(String, usize)> {
        self.catalog().genre_counts()
    }
}
