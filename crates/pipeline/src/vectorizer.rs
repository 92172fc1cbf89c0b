//! TF-IDF vectorizer over tag strings.
//!
//! ## Weighting
//! - tf: raw count of the term in the document
//! - idf: `ln((1 + n) / (1 + df)) + 1` with smoothing, `ln(n / df) + 1` without
//! - each row is scaled to unit L2 norm; an all-zero row stays zero
//!
//! The vocabulary is every token seen during `fit`, minus stop words, sorted
//! lexicographically. Column `j` of the output is `vocabulary[j]`.

use crate::error::{FeatureError, Result};
use crate::matrix::{FeatureMatrix, SparseRow};
use crate::stop_words::is_stop_word;
use crate::tokenizer::WordTokenizer;
use crate::traits::Tokenizer;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Learned state of a fitted vectorizer
#[derive(Debug, Clone)]
struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, u32>,
    idf: Vec<f64>,
}

pub struct TfidfVectorizer {
    tokenizer: Box<dyn Tokenizer>,
    stop_words: bool,
    smooth_idf: bool,
    normalize: bool,
    vocabulary: Option<Vocabulary>,
}

impl TfidfVectorizer {
    /// Word tokenizer, English stop words, smoothed idf, L2 rows
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(WordTokenizer::new()),
            stop_words: true,
            smooth_idf: true,
            normalize: true,
            vocabulary: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Exclude English stop words from the vocabulary (default: true)
    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.stop_words = enabled;
        self
    }

    pub fn with_smooth_idf(mut self, enabled: bool) -> Self {
        self.smooth_idf = enabled;
        self
    }

    /// Scale rows to unit L2 norm (default: true)
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize = enabled;
        self
    }

    fn terms<'a>(&self, doc: &'a str) -> Vec<&'a str> {
        let mut terms = self.tokenizer.tokenize(doc);
        if self.stop_words {
            terms.retain(|t| !is_stop_word(t));
        }
        terms
    }

    /// Learn vocabulary and document frequencies from `docs`
    #[instrument(skip_all, fields(docs = docs.len()))]
    pub fn fit<S: AsRef<str> + Sync>(&mut self, docs: &[S]) -> &mut Self {
        let doc_terms: Vec<HashSet<&str>> = docs
            .par_iter()
            .map(|doc| self.terms(doc.as_ref()).into_iter().collect())
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &doc_terms {
            for &term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = docs.len() as f64;
        let smooth = if self.smooth_idf { 1.0 } else { 0.0 };
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            terms.push(term.to_string());
            idf.push(((smooth + n) / (smooth + df as f64)).ln() + 1.0);
        }
        let index = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col as u32))
            .collect();

        if terms.is_empty() {
            warn!("Vocabulary is empty: every document is blank or stop words only");
        }
        info!(
            "Fitted {} on {} documents, vocabulary size {}",
            self.tokenizer.name(),
            docs.len(),
            terms.len()
        );

        self.vocabulary = Some(Vocabulary { terms, index, idf });
        self
    }

    /// Weight `docs` against the fitted vocabulary; unseen terms are ignored
    pub fn transform<S: AsRef<str> + Sync>(&self, docs: &[S]) -> Result<FeatureMatrix> {
        let vocab = self.vocabulary.as_ref().ok_or(FeatureError::NotFitted)?;

        let rows: Vec<SparseRow> = docs
            .par_iter()
            .map(|doc| self.weigh(vocab, doc.as_ref()))
            .collect();

        let zero_rows = rows.iter().filter(|r| r.is_zero()).count();
        if zero_rows > 0 {
            debug!("{} of {} rows have no vocabulary terms", zero_rows, rows.len());
        }

        FeatureMatrix::new(vocab.terms.clone(), rows)
    }

    fn weigh(&self, vocab: &Vocabulary, doc: &str) -> SparseRow {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for term in self.terms(doc) {
            if let Some(&col) = vocab.index.get(term) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut weights: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(col, tf)| (col, f64::from(tf) * vocab.idf[col as usize]))
            .collect();
        // fixed summation order keeps rebuilds bit-identical
        weights.sort_unstable_by_key(|&(col, _)| col);

        if self.normalize {
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut weights {
                    *w /= norm;
                }
            }
        }

        SparseRow::new(weights.into_iter().map(|(col, w)| (col, w as f32)).collect())
    }

    /// `fit` then `transform` over the same corpus
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, docs: &[S]) -> Result<FeatureMatrix> {
        self.fit(docs);
        self.transform(docs)
    }

    /// Learned terms in column order, `None` before `fit`
    pub fn vocabulary(&self) -> Option<&[String]> {
        self.vocabulary.as_ref().map(|v| v.terms.as_slice())
    }

    /// Learned idf per column, `None` before `fit`
    pub fn idf(&self) -> Option<&[f64]> {
        self.vocabulary.as_ref().map(|v| v.idf.as_slice())
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fit a default vectorizer on `tags` and return their feature matrix
///
/// Output row `i` corresponds to `tags[i]`.
pub fn vectorize<S: AsRef<str> + Sync>(tags: &[S]) -> Result<FeatureMatrix> {
    TfidfVectorizer::new().fit_transform(tags)
}
