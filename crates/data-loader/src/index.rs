//! Catalog loading: join the two raw tables and parse every structured field.
//!
//! The join is the schema boundary. Each joined row is turned into a typed
//! `MovieMetadata` here or the whole load fails, so nothing downstream ever
//! sees a half-parsed record.

use crate::error::{DataLoadError, Result};
use crate::parser::{self, RawCreditRow, RawMovieRow, TOP_CAST_LIMIT};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// A metadata row paired with its credits row, fields still serialized
#[derive(Debug, Clone)]
pub struct JoinedRow {
    pub movie: RawMovieRow,
    pub credits: RawCreditRow,
}

/// Inner join of the two tables on `title`
///
/// Output order follows the movies table; several credit rows for one title
/// follow credit-table order. When a title is ambiguous, credit rows whose
/// `movie_id` agrees with the movie's `id` win; if none agree, every match is
/// kept. Movies without any credits row are dropped.
pub fn join_on_title(movies: Vec<RawMovieRow>, credits: Vec<RawCreditRow>) -> Vec<JoinedRow> {
    let mut credits_by_title: HashMap<&str, Vec<&RawCreditRow>> = HashMap::new();
    for credit in &credits {
        credits_by_title
            .entry(credit.title.as_str())
            .or_default()
            .push(credit);
    }

    let mut joined = Vec::with_capacity(movies.len());
    let mut unmatched = 0usize;

    for movie in &movies {
        let Some(candidates) = credits_by_title.get(movie.title.as_str()) else {
            unmatched += 1;
            continue;
        };

        let agreeing: Vec<&RawCreditRow> = candidates
            .iter()
            .copied()
            .filter(|c| c.movie_id == movie.id)
            .collect();
        let chosen = if agreeing.is_empty() { candidates.clone() } else { agreeing };

        for credit in chosen {
            joined.push(JoinedRow {
                movie: movie.clone(),
                credits: credit.clone(),
            });
        }
    }

    debug!(
        "Joined {} movies with {} credit rows: {} rows, {} movies without credits",
        movies.len(),
        credits.len(),
        joined.len(),
        unmatched
    );
    joined
}

/// Parse the structured fields of one joined row
///
/// `row` is the row's position in the joined table; `file` names the source
/// in the error.
pub fn parse_joined_row(row: usize, joined: &JoinedRow, file: &str) -> Result<MovieMetadata> {
    let field_err = |field: &str, err: DataLoadError| DataLoadError::ParseError {
        file: file.to_string(),
        row,
        field: field.to_string(),
        reason: err.to_string(),
    };

    let genres = parser::parse_structured_list(&joined.movie.genres)
        .map_err(|e| field_err("genres", e))?;
    let keywords = parser::parse_structured_list(&joined.movie.keywords)
        .map_err(|e| field_err("keywords", e))?;
    let cast = parser::extract_top_cast(&joined.credits.cast, TOP_CAST_LIMIT)
        .map_err(|e| field_err("cast", e))?;
    let crew = parser::extract_directors(&joined.credits.crew)
        .map_err(|e| field_err("crew", e))?;

    Ok(MovieMetadata {
        movie_id: joined.credits.movie_id,
        title: joined.movie.title.clone(),
        overview: joined.movie.overview.clone().unwrap_or_default(),
        genres,
        keywords,
        cast,
        crew,
        year: joined
            .movie
            .release_date
            .as_deref()
            .and_then(parser::extract_year),
        vote_average: joined.movie.vote_average,
    })
}

/// Join both raw tables and parse every row, preserving join order
///
/// Fails on the first malformed row; no partial catalog is returned.
pub fn build_metadata(
    movies: Vec<RawMovieRow>,
    credits: Vec<RawCreditRow>,
    file: &str,
) -> Result<Vec<MovieMetadata>> {
    let joined = join_on_title(movies, credits);
    joined
        .par_iter()
        .enumerate()
        .map(|(row, j)| parse_joined_row(row, j, file))
        .collect()
}

/// Load and parse the raw catalog from the two table files
///
/// Both files are read in parallel, then joined and parsed.
pub fn load_metadata(movies_path: &Path, credits_path: &Path) -> Result<Vec<MovieMetadata>> {
    info!(
        "Loading catalog from {:?} and {:?}",
        movies_path, credits_path
    );

    let (movies, credits) = rayon::join(
        || parser::parse_movies(movies_path),
        || parser::parse_credits(credits_path),
    );
    let movies = movies?;
    let credits = credits?;

    info!("Read {} movie rows, {} credit rows", movies.len(), credits.len());

    let label = format!("{} + {}", movies_path.display(), credits_path.display());
    let metadata = build_metadata(movies, credits, &label)?;

    info!("Parsed {} catalog rows", metadata.len());
    Ok(metadata)
}

impl Catalog {
    /// Check structural integrity of the table
    ///
    /// Every row needs a non-empty title: title lookup is the user-facing
    /// query key.
    pub fn validate(&self) -> Result<()> {
        if let Some((row, _)) = self
            .movies
            .iter()
            .enumerate()
            .find(|(_, m)| m.title.trim().is_empty())
        {
            return Err(DataLoadError::ValidationError(format!(
                "row {} has an empty title",
                row
            )));
        }
        Ok(())
    }

    /// Number of movies per genre, most common first (ties by name)
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        count_genres(self.movies.iter())
    }
}

/// Genre distribution over any set of records, most common first
pub fn count_genres<'a>(movies: impl Iterator<Item = &'a MovieRecord>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for movie in movies {
        for genre in &movie.genres {
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(genre, count)| (genre.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MOVIES: &str = "\
id,title,overview,genres,keywords,release_date,vote_average
19995,Avatar,A paraplegic marine.,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",\"[{\"\"id\"\": 1463, \"\"name\"\": \"\"culture clash\"\"}]\",2009-12-10,7.2
285,Pirates,Captain Barbossa.,\"[{\"\"id\"\": 12, \"\"name\"\": \"\"Adventure\"\"}]\",[],2007-05-19,6.9
1,No Credits,,[],[],,
";

    const CREDITS: &str = "\
movie_id,title,cast,crew
285,Pirates,\"[{\"\"name\"\": \"\"Johnny Depp\"\"}]\",\"[{\"\"name\"\": \"\"Gore Verbinski\"\", \"\"job\"\": \"\"Director\"\"}]\"
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}, {\"\"name\"\": \"\"Zoe Saldana\"\"}]\",\"[{\"\"name\"\": \"\"James Cameron\"\", \"\"job\"\": \"\"Director\"\"}]\"
";

    fn movie(id: u32, title: &str) -> RawMovieRow {
        RawMovieRow {
            id,
            title: title.to_string(),
            overview: None,
            genres: "[]".to_string(),
            keywords: "[]".to_string(),
            release_date: None,
            vote_average: None,
        }
    }

    fn credit(movie_id: u32, title: &str) -> RawCreditRow {
        RawCreditRow {
            movie_id,
            title: title.to_string(),
            cast: "[]".to_string(),
            crew: "[]".to_string(),
        }
    }

    #[test]
    fn test_build_metadata_follows_movie_table_order() {
        let movies = parser::read_movies(MOVIES.as_bytes(), "movies.csv").unwrap();
        let credits = parser::read_credits(CREDITS.as_bytes(), "credits.csv").unwrap();
        let metadata = build_metadata(movies, credits, "test").unwrap();

        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0].title, "Avatar");
        assert_eq!(metadata[0].movie_id, 19995);
        assert_eq!(metadata[0].genres, vec!["Action"]);
        assert_eq!(metadata[0].keywords, vec!["culture clash"]);
        assert_eq!(metadata[0].cast, vec!["Sam Worthington", "Zoe Saldana"]);
        assert_eq!(metadata[0].crew, vec!["James Cameron"]);
        assert_eq!(metadata[0].year, Some(2009));
        assert_eq!(metadata[0].vote_average, Some(7.2));
        assert_eq!(metadata[1].title, "Pirates");
        assert!(metadata[1].keywords.is_empty());
    }

    #[test]
    fn test_join_prefers_agreeing_ids_for_duplicate_titles() {
        let movies = vec![movie(10, "The Host"), movie(20, "The Host")];
        let credits = vec![credit(20, "The Host"), credit(10, "The Host")];

        let joined = join_on_title(movies, credits);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].movie.id, 10);
        assert_eq!(joined[0].credits.movie_id, 10);
        assert_eq!(joined[1].movie.id, 20);
        assert_eq!(joined[1].credits.movie_id, 20);
    }

    #[test]
    fn test_join_keeps_all_matches_when_ids_disagree() {
        let movies = vec![movie(1, "Batman")];
        let credits = vec![credit(7, "Batman"), credit(8, "Batman")];

        let joined = join_on_title(movies, credits);
        let ids: Vec<u32> = joined.iter().map(|j| j.credits.movie_id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_malformed_genres_fails_whole_build() {
        let mut bad = movie(2, "Broken");
        bad.genres = "Action|Drama".to_string();
        let movies = vec![movie(1, "Fine"), bad];
        let credits = vec![credit(1, "Fine"), credit(2, "Broken")];

        let err = build_metadata(movies, credits, "test").unwrap_err();
        match err {
            DataLoadError::ParseError { row, field, .. } => {
                assert_eq!(row, 1);
                assert_eq!(field, "genres");
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_metadata_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.csv");
        let credits_path = dir.path().join("credits.csv");
        std::fs::File::create(&movies_path)
            .unwrap()
            .write_all(MOVIES.as_bytes())
            .unwrap();
        std::fs::File::create(&credits_path)
            .unwrap()
            .write_all(CREDITS.as_bytes())
            .unwrap();

        let metadata = load_metadata(&movies_path, &credits_path).unwrap();
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_genre_counts_sorted() {
        let record = |title: &str, genres: &[&str]| MovieRecord {
            movie_id: 0,
            title: title.to_string(),
            overview: String::new(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            keywords: vec![],
            cast: vec![],
            crew: vec![],
            tags: String::new(),
            year: None,
            vote_average: None,
        };
        let catalog = Catalog::from_records(vec![
            record("A", &["Drama", "Action"]),
            record("B", &["Action"]),
            record("C", &["Comedy"]),
        ]);

        assert_eq!(
            catalog.genre_counts(),
            vec![
                ("Action".to_string(), 2),
                ("Comedy".to_string(), 1),
                ("Drama".to_string(), 1)
            ]
        );
        assert!(catalog.validate().is_ok());
        assert!(Catalog::from_records(vec![record(" ", &[])]).validate().is_err());
    }
}
