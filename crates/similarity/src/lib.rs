//! # Similarity Crate
//!
//! Pairwise content similarity between catalog movies and nearest-neighbour
//! queries over it.
//!
//! ## Components
//!
//! ### SimilarityMatrix
//! Dense N x N cosine similarities built once from a `FeatureMatrix`:
//! - Symmetric, values in [-1, 1]
//! - Diagonal 1.0, except all-zero feature rows which score 0 everywhere
//! - Read-only after construction, safe to share across threads
//!
//! ### Queries
//! `top_k_similar` / `top_k_scored`: the k most similar other rows, score
//! descending, ties by ascending row index.
//!
//! ## Example Usage
//!
//! ```ignore
//! use pipeline::FeatureBuilder;
//! use similarity::SimilarityMatrix;
//!
//! let features = FeatureBuilder::new().build(metadata)?;
//! let index = SimilarityMatrix::build(&features.matrix);
//! let neighbours = index.top_k_similar(0, 10)?;
//! ```
//!
//! ## Performance
//!
//! Memory is N² f32 for the matrix. Build cost is proportional to the number
//! of row pairs sharing at least one term, parallel over rows.

pub mod error;
pub mod matrix;
pub mod query;

pub use error::{Result, SimilarityError};
pub use matrix::SimilarityMatrix;
pub use query::{ScoredMatch, DEFAULT_K};
