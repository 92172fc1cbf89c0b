//! # Data Loader Crate
//!
//! This crate loads the raw movie catalog: a metadata table and a credits
//! table, joined on title, with their serialized `{id, name}` list fields
//! parsed into typed records.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieMetadata, MovieRecord, Catalog)
//! - **parser**: CSV tables and structured-list fields
//! - **index**: Title join, row parsing and catalog-level checks
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_metadata;
//! use std::path::Path;
//!
//! let metadata = load_metadata(
//!     Path::new("data/tmdb_5000_movies.csv"),
//!     Path::new("data/tmdb_5000_credits.csv"),
//! )?;
//! println!("{} movies, first is {}", metadata.len(), metadata[0].title);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{build_metadata, count_genres, join_on_title, load_metadata};
pub use parser::{extract_directors, extract_top_cast, parse_structured_list};
pub use types::{
    // Type aliases
    MovieId,
    RowIndex,
    // Core types
    Catalog,
    MovieMetadata,
    MovieRecord,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn record(movie_id: MovieId, title: &str) -> MovieRecord {
        MovieRecord {
            movie_id,
            title: title.to_string(),
            overview: String::new(),
            genres: vec!["Action".to_string()],
            keywords: vec![],
            cast: vec![],
            crew: vec![],
            tags: "action".to_string(),
            year: Some(2000),
            vote_average: Some(6.5),
        }
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_insert_movie_assigns_rows_in_order() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.insert_movie(record(10, "First")), 0);
        assert_eq!(catalog.insert_movie(record(20, "Second")), 1);

        assert_eq!(catalog.get_movie(1).unwrap().movie_id, 20);
        assert_eq!(catalog.row_for_id(10), Some(0));
        assert_eq!(catalog.rows_with_title("Second"), &[1]);
    }

    #[test]
    fn test_duplicate_titles_keep_table_order() {
        let catalog = Catalog::from_records(vec![
            record(1, "The Host"),
            record(2, "Other"),
            record(3, "The Host"),
        ]);
        assert_eq!(catalog.rows_with_title("The Host"), &[0, 2]);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();
        assert!(catalog.get_movie(0).is_none());
        assert!(catalog.row_for_id(999).is_none());
        assert!(catalog.rows_with_title("Nothing").is_empty());
        assert!(catalog.genre_counts().is_empty());
    }
}
