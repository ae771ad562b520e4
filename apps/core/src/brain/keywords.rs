//! Candidate-term extraction for inventory questions.
//!
//! Splits text into alphabetic words, drops question and filler words, and builds the
//! unigram + adjacent-bigram candidates that get matched against inventory keys.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Question and filler words that never name an inventory item
const STOPWORDS: &[&str] = &[
    "how", "to", "make", "cook", "prepare", "the", "a", "an", "and", "of", "for", "do", "we",
    "have", "any", "is", "there", "stock", "in", "our", "restaurant", "available",
    "availability", "left", "many", "quantity", "count", "units", "unit", "give", "me",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Candidate terms extracted from one query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryTerms {
    /// Content words in text order
    pub tokens: Vec<String>,
    /// Adjacent pairs of content words
    pub bigrams: Vec<String>,
}

impl QueryTerms {
    /// Tokenize `text` and build candidate terms
    pub fn extract(text: &str) -> Self {
        let tokens = tokenize(text);
        let bigrams = ngrams(&tokens, 2);
        Self { tokens, bigrams }
    }

    /// Unigrams followed by bigrams, duplicates removed, first occurrence kept
    pub fn candidates(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for term in self.tokens.iter().chain(self.bigrams.iter()) {
            if seen.insert(term.as_str()) {
                candidates.push(term.clone());
            }
        }
        candidates
    }
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Lowercased runs of ASCII letters, stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty() && !is_stopword(word))
        .map(str::to_string)
        .collect()
}

/// Space-joined windows of `n` adjacent tokens
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 {
        return vec![];
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}
