//! Core traits for the feature pipeline.
//!
//! The vectorizer only needs "text in, terms out", so tokenization sits
//! behind a trait and can be swapped without touching tf-idf weighting.

/// Splits a document into terms.
///
/// `Send + Sync` lets a vectorizer transform documents on the rayon pool.
pub trait Tokenizer: Send + Sync {
    /// Returns the name of this tokenizer (for logging/debugging)
    fn name(&self) -> &str;

    /// Split `text` into terms, in document order.
    ///
    /// Repeated terms are returned every time they occur; counting is the
    /// vectorizer's job.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}
