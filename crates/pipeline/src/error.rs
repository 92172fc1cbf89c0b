//! Error types for feature building.

use thiserror::Error;

/// Errors raised while vectorizing tag strings or assembling a feature matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// `transform` was called before the vectorizer learned a vocabulary
    #[error("Vectorizer has not been fitted")]
    NotFitted,

    /// A sparse row referenced a column past the vocabulary
    #[error("Row {row} references column {column}, but the vocabulary has {n_cols} terms")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        n_cols: usize,
    },

    /// Dense input doesn't match the vocabulary width
    #[error("Expected {expected} columns, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, FeatureError>;
