//! Feature building for the whole catalog.
//!
//! Takes parsed metadata in catalog order and produces the tagged records
//! plus their tf-idf matrix. Row `i` of `FeatureSet::matrix` always describes
//! `FeatureSet::records[i]`.

use crate::error::Result;
use crate::matrix::FeatureMatrix;
use crate::tags::tag_metadata;
use crate::vectorizer::TfidfVectorizer;
use data_loader::{MovieMetadata, MovieRecord};
use std::time::Instant;
use tracing::{info, instrument};

/// Tagged records and their row-aligned features
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub records: Vec<MovieRecord>,
    pub matrix: FeatureMatrix,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Runs tag derivation and vectorization over a catalog.
///
/// ## Usage
/// ```ignore
/// let metadata = data_loader::load_metadata(movies, credits)?;
/// let features = FeatureBuilder::new().build(metadata)?;
/// ```
pub struct FeatureBuilder {
    vectorizer: TfidfVectorizer,
}

impl FeatureBuilder {
    /// Builder with the default tf-idf settings
    pub fn new() -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(),
        }
    }

    /// Use a custom-configured vectorizer
    pub fn with_vectorizer(vectorizer: TfidfVectorizer) -> Self {
        Self { vectorizer }
    }

    /// Derive tags for every row, then fit and transform the whole corpus.
    ///
    /// # Arguments
    /// * `metadata` - Parsed catalog rows in table order
    ///
    /// # Returns
    /// Records and matrix with identical row order
    #[instrument(skip_all, fields(rows = metadata.len()))]
    pub fn build(mut self, metadata: Vec<MovieMetadata>) -> Result<FeatureSet> {
        let start = Instant::now();

        let records = tag_metadata(metadata);
        let tags: Vec<&str> = records.iter().map(|r| r.tags.as_str()).collect();
        let matrix = self.vectorizer.fit_transform(&tags)?;

        info!(
            "Built features: {} rows x {} terms ({} non-zero) in {:?}",
            matrix.n_rows(),
            matrix.n_cols(),
            matrix.nnz(),
            start.elapsed()
        );

        Ok(FeatureSet { records, matrix })
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}
