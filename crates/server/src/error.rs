//! Error types for the serving layer.
//!
//! Query-time variants (`TitleNotFound`, `MovieIdNotFound`, `Similarity`) are
//! recoverable: report them and keep serving. The rest come from building or
//! loading an artifact and mean there is nothing safe to serve.

use data_loader::{DataLoadError, MovieId};
use pipeline::FeatureError;
use similarity::SimilarityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// No catalog row carries this exact title
    #[error("Movie not found: '{0}'")]
    TitleNotFound(String),

    #[error("No movie with id {0}")]
    MovieIdNotFound(MovieId),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),

    /// Movie table and similarity matrix disagree on row count
    #[error("Artifact is misaligned: {movies} movies but a {rows}x{cols} similarity matrix")]
    Dimension {
        movies: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Not a recommender artifact")]
    InvalidFormat,

    #[error("Unsupported artifact version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

impl EngineError {
    /// Whether a query can simply report this and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::TitleNotFound(_)
                | EngineError::MovieIdNotFound(_)
                | EngineError::Similarity(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
