//! Core domain types for the movie catalog.
//!
//! - `MovieMetadata`: one joined, parsed catalog row (no derived fields yet)
//! - `MovieRecord`: the same row plus its derived `tags` string
//! - `Catalog`: the row-ordered record table with lookup indices

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog-assigned movie identifier
pub type MovieId = u32;

/// Position of a movie in the catalog table.
///
/// The same index addresses the movie's feature row and similarity row.
pub type RowIndex = usize;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A joined catalog row with every structured field already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// First three credited actors (fewer when the cast list is shorter)
    pub cast: Vec<String>,
    /// Director names only, in credit order
    pub crew: Vec<String>,
    /// Release year taken from `release_date`, when the table has one
    pub year: Option<u16>,
    /// Aggregate rating as shipped in the metadata table
    pub vote_average: Option<f32>,
}

/// A catalog entry as stored in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
    /// Lower-cased, space-joined genres + keywords + cast + crew
    pub tags: String,
    pub year: Option<u16>,
    pub vote_average: Option<f32>,
}

impl MovieRecord {
    /// Attach a derived tag string to parsed metadata.
    pub fn from_metadata(metadata: MovieMetadata, tags: String) -> Self {
        Self {
            movie_id: metadata.movie_id,
            title: metadata.title,
            overview: metadata.overview,
            genres: metadata.genres,
            keywords: metadata.keywords,
            cast: metadata.cast,
            crew: metadata.crew,
            tags,
            year: metadata.year,
            vote_average: metadata.vote_average,
        }
    }
}

// =============================================================================
// Catalog - the row-ordered record table
// =============================================================================

/// Row-ordered movie table.
///
/// Rows are never reordered or removed once inserted. Titles are not unique,
/// so the title index keeps every row for a title in table order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<MovieRecord>", into = "Vec<MovieRecord>")]
pub struct Catalog {
    pub(crate) movies: Vec<MovieRecord>,
    /// First row carrying each movie id
    pub(crate) id_index: HashMap<MovieId, RowIndex>,
    /// Every row for an exact title, ascending
    pub(crate) title_index: HashMap<String, Vec<RowIndex>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            id_index: HashMap::new(),
            title_index: HashMap::new(),
        }
    }

    /// Build a catalog from records, keeping their order as row order
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut catalog = Self::new();
        catalog.movies.reserve(records.len());
        for record in records {
            catalog.insert_movie(record);
        }
        catalog
    }

    /// Append a movie as the next row and return its row index
    pub fn insert_movie(&mut self, movie: MovieRecord) -> RowIndex {
        let row = self.movies.len();
        self.id_index.entry(movie.movie_id).or_insert(row);
        self.title_index
            .entry(movie.title.clone())
            .or_default()
            .push(row);
        self.movies.push(movie);
        row
    }

    /// Get the movie stored at a row
    pub fn get_movie(&self, row: RowIndex) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    /// Row index of the first movie carrying `id`
    pub fn row_for_id(&self, id: MovieId) -> Option<RowIndex> {
        self.id_index.get(&id).copied()
    }

    /// All rows whose title equals `title` exactly, in table order
    ///
    /// Returns an empty slice if nothing matches
    pub fn rows_with_title(&self, title: &str) -> &[RowIndex] {
        self.title_index
            .get(title)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All records in row order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<MovieRecord>> for Catalog {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<Catalog> for Vec<MovieRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.movies
    }
}
