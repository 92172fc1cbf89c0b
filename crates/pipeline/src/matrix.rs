//! Row-aligned tf-idf feature matrix.
//!
//! Logically this is a dense N x D matrix (one row per catalog row, one
//! column per vocabulary term). Tag strings touch only a handful of terms
//! each, so rows are stored sparsely and densified on demand.

use crate::error::{FeatureError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Non-zero entries of one feature row, columns strictly ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(u32, f32)>", into = "Vec<(u32, f32)>")]
pub struct SparseRow {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl SparseRow {
    /// Build a row from `(column, value)` pairs.
    ///
    /// Pairs are sorted by column; zero values are dropped.
    pub fn new(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(col, _)| col);
        let (indices, values) = entries.into_iter().filter(|&(_, v)| v != 0.0).unzip();
        Self { indices, values }
    }

    /// Iterate `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .zip(&self.values)
            .map(|(&col, &value)| (col as usize, value))
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `column`, 0.0 when not stored
    pub fn get(&self, column: usize) -> f32 {
        self.indices
            .binary_search(&(column as u32))
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Euclidean norm, accumulated in f64
    pub fn norm(&self) -> f32 {
        self.values
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt() as f32
    }

    /// Dot product with another sparse row (merge over sorted indices)
    pub fn dot(&self, other: &SparseRow) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0f64;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += f64::from(self.values[i]) * f64::from(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        acc as f32
    }
}

impl From<Vec<(u32, f32)>> for SparseRow {
    fn from(entries: Vec<(u32, f32)>) -> Self {
        Self::new(entries)
    }
}

impl From<SparseRow> for Vec<(u32, f32)> {
    fn from(row: SparseRow) -> Self {
        row.indices.into_iter().zip(row.values).collect()
    }
}

#[derive(Deserialize)]
struct FeatureMatrixData {
    vocabulary: Vec<String>,
    rows: Vec<SparseRow>,
}

impl TryFrom<FeatureMatrixData> for FeatureMatrix {
    type Error = FeatureError;

    fn try_from(data: FeatureMatrixData) -> Result<Self> {
        Self::new(data.vocabulary, data.rows)
    }
}

/// Tf-idf features, one row per catalog row
///
/// Deserialization goes through `new`, so column indices are always checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FeatureMatrixData")]
pub struct FeatureMatrix {
    vocabulary: Vec<String>,
    rows: Vec<SparseRow>,
}

impl FeatureMatrix {
    /// Assemble a matrix, checking every column index against the vocabulary
    pub fn new(vocabulary: Vec<String>, rows: Vec<SparseRow>) -> Result<Self> {
        let n_cols = vocabulary.len();
        for (row, sparse) in rows.iter().enumerate() {
            if let Some(&column) = sparse.indices.last() {
                if column as usize >= n_cols {
                    return Err(FeatureError::ColumnOutOfRange {
                        row,
                        column: column as usize,
                        n_cols,
                    });
                }
            }
        }
        Ok(Self { vocabulary, rows })
    }

    /// Build from a dense matrix whose columns follow `vocabulary`
    pub fn from_dense(vocabulary: Vec<String>, dense: &Array2<f32>) -> Result<Self> {
        if dense.ncols() != vocabulary.len() {
            return Err(FeatureError::ShapeMismatch {
                expected: vocabulary.len(),
                found: dense.ncols(),
            });
        }
        let rows = dense
            .rows()
            .into_iter()
            .map(|row| {
                SparseRow::new(
                    row.iter()
                        .enumerate()
                        .map(|(col, &v)| (col as u32, v))
                        .collect(),
                )
            })
            .collect();
        Ok(Self { vocabulary, rows })
    }

    /// N: number of catalog rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// D: vocabulary size
    pub fn n_cols(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn row(&self, row: usize) -> Option<&SparseRow> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    /// Entry at `(row, column)`; `None` outside the matrix
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        if column >= self.n_cols() {
            return None;
        }
        self.rows.get(row).map(|r| r.get(column))
    }

    /// Terms in column order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Total stored entries across all rows
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseRow::nnz).sum()
    }

    pub fn to_dense(&self) -> Array2<f32> {
        let mut dense = Array2::zeros((self.n_rows(), self.n_cols()));
        for (i, row) in self.rows.iter().enumerate() {
            for (col, value) in row.iter() {
                dense[[i, col]] = value;
            }
        }
        dense
    }
}
