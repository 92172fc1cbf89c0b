//! Parsers for the two raw catalog tables and their structured fields.
//!
//! - movies table: `id, title, overview, genres, keywords[, release_date, vote_average]`
//! - credits table: `movie_id, title, cast, crew`
//!
//! `genres`, `keywords`, `cast` and `crew` are JSON arrays of objects embedded
//! in a CSV cell, e.g. `[{"id": 28, "name": "Action"}]`.

use crate::error::{DataLoadError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Columns the movies table must carry
pub const MOVIE_COLUMNS: &[&str] = &["id", "title", "overview", "genres", "keywords"];

/// Columns the credits table must carry
pub const CREDIT_COLUMNS: &[&str] = &["movie_id", "title", "cast", "crew"];

/// Default number of credited actors kept per movie
pub const TOP_CAST_LIMIT: usize = 3;

/// One row of the movies (metadata) table, structured fields still serialized
#[derive(Debug, Clone, Deserialize)]
pub struct RawMovieRow {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    pub genres: String,
    pub keywords: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

/// One row of the credits table, structured fields still serialized
#[derive(Debug, Clone, Deserialize)]
pub struct RawCreditRow {
    pub movie_id: u32,
    pub title: String,
    pub cast: String,
    pub crew: String,
}

#[derive(Deserialize)]
struct NamedEntry {
    name: String,
}

#[derive(Deserialize)]
struct CrewEntry {
    name: String,
    job: String,
}

/// Open a table file, turning a missing file into `FileNotFound`
fn open_table(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(BufReader::new(file))
}

/// Read a CSV table, checking the header row for `required` columns first
fn read_table<R, T>(reader: R, label: &str, required: &[&str]) -> Result<Vec<T>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let csv_err = |source: csv::Error| DataLoadError::Csv {
        file: label.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::MissingColumn {
                file: label.to_string(),
                column: column.to_string(),
            });
        }
    }

    rdr.deserialize()
        .map(|row| row.map_err(csv_err))
        .collect()
}

/// Parse the movies table from any reader
///
/// `label` names the source in error messages.
pub fn read_movies<R: Read>(reader: R, label: &str) -> Result<Vec<RawMovieRow>> {
    read_table(reader, label, MOVIE_COLUMNS)
}

/// Parse the credits table from any reader
pub fn read_credits<R: Read>(reader: R, label: &str) -> Result<Vec<RawCreditRow>> {
    read_table(reader, label, CREDIT_COLUMNS)
}

/// Parse the movies table file
pub fn parse_movies(path: &Path) -> Result<Vec<RawMovieRow>> {
    read_movies(open_table(path)?, &path.display().to_string())
}

/// Parse the credits table file
pub fn parse_credits(path: &Path) -> Result<Vec<RawCreditRow>> {
    read_credits(open_table(path)?, &path.display().to_string())
}

/// Extract the `name` of every entry of a serialized `{id, name}` list
///
/// Example: `[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]`
///          -> `["Action", "Adventure"]`
pub fn parse_structured_list(raw: &str) -> Result<Vec<String>> {
    let entries: Vec<NamedEntry> = serde_json::from_str(raw)?;
    Ok(entries.into_iter().map(|e| e.name).collect())
}

/// Names of the first `limit` entries of a serialized cast list
pub fn extract_top_cast(raw: &str, limit: usize) -> Result<Vec<String>> {
    let mut names = parse_structured_list(raw)?;
    names.truncate(limit);
    Ok(names)
}

/// Names of the crew entries whose job is exactly "Director"
pub fn extract_directors(raw: &str) -> Result<Vec<String>> {
    let entries: Vec<CrewEntry> = serde_json::from_str(raw)?;
    Ok(entries
        .into_iter()
        .filter(|e| e.job == "Director")
        .map(|e| e.name)
        .collect())
}

/// Extract the year from a `YYYY-MM-DD` release date
///
/// Example: "2009-12-10" -> Some(2009)
///          "" -> None
pub fn extract_year(release_date: &str) -> Option<u16> {
    release_date.get(..4)?.parse().ok()
}
