//! Keyword extraction strategies
//!
//! Two independent strategies produce sets of normalized tokens from a text.
//! Overlap diagnostics are computed per strategy and never combined.

use crate::processing::stopwords;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStrategy {
    /// Unicode word tokenization with stemming on top of stop-word removal.
    Linguistic,
    /// Word-boundary tokenization against the fixed stop-word list only.
    Stopword,
}

/// Holds the language resources both strategies draw on. Built once and
/// shared read-only across requests.
pub struct KeywordExtractor {
    stemmer: Stemmer,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Set of normalized keyword tokens for the given strategy. Pure
    /// function of the text and the process-wide language resources.
    pub fn keywords(&self, text: &str, strategy: KeywordStrategy) -> HashSet<String> {
        match strategy {
            KeywordStrategy::Linguistic => self.linguistic_keywords(text),
            KeywordStrategy::Stopword => self.stopword_keywords(text),
        }
    }

    fn linguistic_keywords(&self, text: &str) -> HashSet<String> {
        text.unicode_words()
            .filter(|w| w.chars().all(char::is_alphabetic))
            .map(str::to_lowercase)
            .filter(|w| !stopwords::english().contains(w.as_str()))
            .map(|w| self.stemmer.stem(&w).into_owned())
            .collect()
    }

    fn stopword_keywords(&self, text: &str) -> HashSet<String> {
        text.split_word_bounds()
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .map(str::to_lowercase)
            .filter(|w| !stopwords::english().contains(w.as_str()))
            .collect()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentage of document keywords also present in the query keywords.
/// An empty document set scores 0 rather than dividing by zero.
pub fn overlap_pct(document: &HashSet<String>, query: &HashSet<String>) -> f32 {
    if document.is_empty() {
        return 0.0;
    }
    let shared = document.intersection(query).count();
    round2(100.0 * shared as f32 / document.len() as f32)
}

/// Round to two decimal places for reporting.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
