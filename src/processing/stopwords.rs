//! Fixed English stop-word list
//!
//! Shared by the stop-word keyword strategy and the lexical similarity
//! vocabulary. Built once per process and read-only afterwards.

use std::collections::HashSet;
use std::sync::OnceLock;

static ENGLISH: OnceLock<HashSet<&'static str>> = OnceLock::new();

const ENGLISH_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

pub fn english() -> &'static HashSet<&'static str> {
    ENGLISH.get_or_init(|| ENGLISH_WORDS.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_function_words_are_listed() {
        let words = english();
        assert!(words.contains("the"));
        assert!(words.contains("and"));
        assert!(words.contains("with"));
    }

    #[test]
    fn content_words_are_not() {
        let words = english();
        assert!(!words.contains("rust"));
        assert!(!words.contains("engineer"));
    }
}
