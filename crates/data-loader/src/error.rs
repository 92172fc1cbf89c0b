//! Error types for the data-loader crate.
//!
//! Every error here is fatal to a catalog load: a partially parsed catalog
//! would break row alignment for everything built on top of it, so the loader
//! stops at the first problem instead of skipping rows.

use thiserror::Error;

/// Errors that can occur during catalog loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV layer rejected a record (bad quoting, wrong field type, ...)
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A structured field of a joined row couldn't be parsed
    ///
    /// `row` is the 0-based position in the joined catalog, which is also the
    /// row index the movie would have had in the feature and similarity matrices.
    #[error("Parse error at row {row} in {file}, field '{field}': {reason}")]
    ParseError {
        file: String,
        row: usize,
        field: String,
        reason: String,
    },

    /// A serialized `{id, name}` list was not well-formed
    #[error("Malformed structured list: {0}")]
    MalformedList(#[from] serde_json::Error),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
