//! Top-k queries over a built similarity matrix.
//!
//! Ordering: similarity descending, ties by ascending row index. The queried
//! row is never part of its own result.

use crate::error::Result;
use crate::matrix::SimilarityMatrix;
use data_loader::RowIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Default number of neighbours returned by a query
pub const DEFAULT_K: usize = 10;

/// One neighbour of a queried row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub row: RowIndex,
    pub score: f32,
}

fn rank(a: &ScoredMatch, b: &ScoredMatch) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.row.cmp(&b.row))
}

impl SimilarityMatrix {
    /// The `min(k, N-1)` rows most similar to `row`, with their scores
    #[instrument(skip(self))]
    pub fn top_k_scored(&self, row: RowIndex, k: usize) -> Result<Vec<ScoredMatch>> {
        let scores = self.row(row)?;

        let mut matches: Vec<ScoredMatch> = scores
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != row)
            .map(|(j, &score)| ScoredMatch { row: j, score })
            .collect();

        let k = k.min(matches.len());
        if k == 0 {
            return Ok(Vec::new());
        }
        if k < matches.len() {
            matches.select_nth_unstable_by(k - 1, rank);
            matches.truncate(k);
        }
        matches.sort_unstable_by(rank);

        debug!("Top {} for row {}", matches.len(), row);
        Ok(matches)
    }

    /// The `min(k, N-1)` rows most similar to `row`
    pub fn top_k_similar(&self, row: RowIndex, k: usize) -> Result<Vec<RowIndex>> {
        Ok(self
            .top_k_scored(row, k)?
            .into_iter()
            .map(|m| m.row)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimilarityError;
    use ndarray::array;

    fn matrix() -> SimilarityMatrix {
        SimilarityMatrix::from_array(array![
            [1.0, 0.5, 0.9, 0.5, 0.0],
            [0.5, 1.0, 0.2, 0.3, 0.1],
            [0.9, 0.2, 1.0, 0.4, 0.0],
            [0.5, 0.3, 0.4, 1.0, 0.0],
            [0.0, 0.1, 0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_descending_with_row_tiebreak() {
        assert_eq!(matrix().top_k_similar(0, 10).unwrap(), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_truncates_to_k() {
        let sim = matrix();
        assert_eq!(sim.top_k_similar(0, 2).unwrap(), vec![2, 1]);
        assert_eq!(sim.top_k_similar(0, 3).unwrap(), vec![2, 1, 3]);
        assert!(sim.top_k_similar(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_excludes_self() {
        let sim = matrix();
        for row in 0..sim.len() {
            let result = sim.top_k_similar(row, DEFAULT_K).unwrap();
            assert_eq!(result.len(), sim.len() - 1);
            assert!(!result.contains(&row));
        }
    }

    #[test]
    fn test_scores_attached() {
        let top = matrix().top_k_scored(4, 1).unwrap();
        assert_eq!(top, vec![ScoredMatch { row: 1, score: 0.1 }]);
    }

    #[test]
    fn test_out_of_range_row() {
        assert_eq!(
            matrix().top_k_similar(5, 1).unwrap_err(),
            SimilarityError::RowOutOfRange { row: 5, len: 5 }
        );
    }

    #[test]
    fn test_single_movie_catalog() {
        let sim = SimilarityMatrix::from_array(array![[1.0]]).unwrap();
        assert!(sim.top_k_similar(0, DEFAULT_K).unwrap().is_empty());
    }
}
