//! Error types for the similarity index.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Query row is not in `[0, len)`
    #[error("Row {row} is out of range for a catalog of {len} movies")]
    RowOutOfRange { row: usize, len: usize },

    /// A similarity matrix must be N x N
    #[error("Similarity matrix must be square, got {rows} x {cols}")]
    DimensionMismatch { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
