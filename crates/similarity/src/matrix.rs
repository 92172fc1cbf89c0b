//! Dense pairwise cosine similarity over a feature matrix.
//!
//! ## Algorithm
//! 1. Scale every feature row to unit length (zero rows stay zero)
//! 2. Build an inverted index: column -> [(row, weight)]
//! 3. For each row i (in parallel), walk its non-zero columns in ascending
//!    order and accumulate `w_i[c] * w_j[c]` into every row j sharing `c`
//!
//! Step 3 is the product of the unit matrix with its own transpose, touching
//! only co-occurring terms. Both `(i, j)` and `(j, i)` sum identical products
//! in the same column order, so the result is exactly symmetric.

use crate::error::{Result, SimilarityError};
use data_loader::RowIndex;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView1, Axis};
use pipeline::FeatureMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// N x N cosine similarities, row/column `i` = catalog row `i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    scores: Array2<f32>,
}

/// Feature rows scaled to unit length, columns ascending
fn unit_rows(features: &FeatureMatrix) -> Vec<Vec<(usize, f64)>> {
    features
        .rows()
        .par_iter()
        .map(|row| {
            let norm = f64::from(row.norm());
            if norm == 0.0 {
                return Vec::new();
            }
            row.iter()
                .map(|(col, value)| (col, f64::from(value) / norm))
                .collect()
        })
        .collect()
}

/// Posting list per column: every `(row, weight)` with a non-zero entry there
fn inverted_index(units: &[Vec<(usize, f64)>], n_cols: usize) -> Vec<Vec<(usize, f64)>> {
    let mut postings = vec![Vec::new(); n_cols];
    for (row, entries) in units.iter().enumerate() {
        for &(col, weight) in entries {
            postings[col].push((row, weight));
        }
    }
    postings
}

impl SimilarityMatrix {
    /// Compute cosine similarity for every pair of feature rows.
    ///
    /// A zero-magnitude row has similarity 0 with everything, itself included.
    /// Every other diagonal entry is exactly 1.0.
    #[instrument(skip_all, fields(rows = features.n_rows(), cols = features.n_cols()))]
    pub fn build(features: &FeatureMatrix) -> Self {
        let start = Instant::now();
        let n = features.n_rows();

        let units = unit_rows(features);
        let postings = inverted_index(&units, features.n_cols());
        debug!(
            "Inverted index over {} terms, {} zero rows",
            postings.len(),
            units.iter().filter(|u| u.is_empty()).count()
        );

        let mut scores = Array2::<f32>::zeros((n, n));
        scores
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each_init(
                || vec![0.0f64; n],
                |acc, (i, mut out)| {
                    if units[i].is_empty() {
                        return;
                    }
                    acc.fill(0.0);
                    for &(col, weight) in &units[i] {
                        for &(j, other) in &postings[col] {
                            acc[j] += weight * other;
                        }
                    }
                    for (j, value) in out.iter_mut().enumerate() {
                        *value = (acc[j] as f32).clamp(-1.0, 1.0);
                    }
                    out[i] = 1.0;
                },
            );

        info!(
            "Built {}x{} similarity matrix in {:?}",
            n,
            n,
            start.elapsed()
        );
        Self { scores }
    }

    /// Wrap precomputed scores; the array must be square
    pub fn from_array(scores: Array2<f32>) -> Result<Self> {
        let (rows, cols) = scores.dim();
        if rows != cols {
            return Err(SimilarityError::DimensionMismatch { rows, cols });
        }
        Ok(Self { scores })
    }

    /// N: number of catalog rows covered
    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Similarity between rows `i` and `j`, `None` if either is out of range
    pub fn get(&self, i: RowIndex, j: RowIndex) -> Option<f32> {
        self.scores.get((i, j)).copied()
    }

    /// All similarities of row `i`
    pub fn row(&self, i: RowIndex) -> Result<ArrayView1<'_, f32>> {
        self.check_row(i)?;
        Ok(self.scores.row(i))
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.scores
    }

    /// Whether `|s[i][j] - s[j][i]| <= tolerance` for every pair
    pub fn is_symmetric(&self, tolerance: f32) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (i + 1..n).all(|j| (self.scores[[i, j]] - self.scores[[j, i]]).abs() <= tolerance)
        })
    }

    pub(crate) fn check_row(&self, row: RowIndex) -> Result<()> {
        if row >= self.len() {
            return Err(SimilarityError::RowOutOfRange {
                row,
                len: self.len(),
            });
        }
        Ok(())
    }
}
