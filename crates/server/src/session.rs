//! Caller-owned session state: the watchlist.
//!
//! The recommender never sees a `Session`. Callers hold one per user, pass
//! query results through it, and read analytics from it against the catalog.

use crate::recommender::MovieRecommendation;
use data_loader::{count_genres, Catalog, MovieRecord};
use serde::{Deserialize, Serialize};

/// Ordered watchlist of titles, no duplicates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    watchlist: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `title` unless already present; returns whether it was added
    pub fn add(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.contains(&title) {
            return false;
        }
        self.watchlist.push(title);
        true
    }

    /// Remove `title`; returns whether it was present
    pub fn remove(&mut self, title: &str) -> bool {
        let before = self.watchlist.len();
        self.watchlist.retain(|t| t != title);
        self.watchlist.len() != before
    }

    pub fn contains(&self, title: &str) -> bool {
        self.watchlist.iter().any(|t| t == title)
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    pub fn len(&self) -> usize {
        self.watchlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchlist.is_empty()
    }

    /// Drop recommendations whose title is already on the watchlist
    pub fn unwatched(&self, recommendations: Vec<MovieRecommendation>) -> Vec<MovieRecommendation> {
        recommendations
            .into_iter()
            .filter(|rec| !self.contains(&rec.title))
            .collect()
    }

    /// Catalog records for watchlist titles, first match per title.
    ///
    /// Titles that aren't in the catalog (e.g. added from the popular
    /// listing) are skipped.
    fn catalog_entries<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a MovieRecord> + 'a {
        self.watchlist.iter().filter_map(move |title| {
            let row = *catalog.rows_with_title(title).first()?;
            catalog.get_movie(row)
        })
    }

    /// Genres across the watchlist, most common first
    pub fn genre_distribution(&self, catalog: &Catalog) -> Vec<(String, usize)> {
        count_genres(self.catalog_entries(catalog))
    }

    /// `(title, vote_average)` in watchlist order, for rated catalog titles
    pub fn rating_trend(&self, catalog: &Catalog) -> Vec<(String, f32)> {
        self.catalog_entries(catalog)
            .filter_map(|movie| Some((movie.title.clone(), movie.vote_average?)))
            .collect()
    }
}
