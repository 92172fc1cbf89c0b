//! Feature building for content-based movie similarity.
//!
//! This crate provides:
//! - Tag derivation from parsed metadata (genres, keywords, cast, directors)
//! - Tokenizer trait and the default word tokenizer
//! - TfidfVectorizer with the built-in English stop word list
//! - FeatureMatrix, the row-aligned tf-idf matrix
//!
//! ## Architecture
//! Metadata is processed in stages:
//! 1. Tags are derived per row (pure, row-independent)
//! 2. The vectorizer learns the vocabulary over the whole tag corpus
//! 3. Every tag string is weighted into one matrix row
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FeatureBuilder;
//!
//! let metadata = data_loader::load_metadata(movies_path, credits_path)?;
//! let features = FeatureBuilder::new().build(metadata)?;
//! assert_eq!(features.records.len(), features.matrix.n_rows());
//! ```

pub mod error;
pub mod features;
pub mod matrix;
pub mod stop_words;
pub mod tags;
pub mod tokenizer;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use error::{FeatureError, Result};
pub use features::{FeatureBuilder, FeatureSet};
pub use matrix::{FeatureMatrix, SparseRow};
pub use stop_words::{is_stop_word, ENGLISH_STOP_WORDS};
pub use tags::{build_tags, tag_metadata, tags_for};
pub use tokenizer::WordTokenizer;
pub use traits::Tokenizer;
pub use vectorizer::{vectorize, TfidfVectorizer};
