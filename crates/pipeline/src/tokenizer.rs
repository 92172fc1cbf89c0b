//! Word tokenizer matching the usual tf-idf token pattern: runs of two or
//! more word characters (letters, digits, underscore).

use crate::traits::Tokenizer;

/// Splits on every character that is not alphanumeric or `_`.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    min_len: usize,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self { min_len: 2 }
    }

    /// Minimum token length in characters (default: 2)
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Tokenizer for WordTokenizer {
    fn name(&self) -> &str {
        "WordTokenizer"
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(|c: char| !is_word_char(c))
            .filter(|token| token.chars().count() >= self.min_len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_punctuation_and_whitespace() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("science fiction  sam worthington's mo-cap"),
            vec!["science", "fiction", "sam", "worthington", "mo", "cap"]
        );
    }

    #[test]
    fn test_drops_single_characters() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.tokenize("action x d1 a"), vec!["action", "d1"]);
    }

    #[test]
    fn test_keeps_unicode_words() {
        let tokenizer = WordTokenizer::new();
        assert_eq!(tokenizer.tokenize("amélie poulain"), vec!["amélie", "poulain"]);
    }

    #[test]
    fn test_custom_min_len() {
        let tokenizer = WordTokenizer::new().with_min_len(1);
        assert_eq!(tokenizer.tokenize("x y"), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(WordTokenizer::new().tokenize("").is_empty());
        assert!(WordTokenizer::new().tokenize(" - ").is_empty());
    }
}
