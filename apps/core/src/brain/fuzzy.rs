//! Fuzzy resolution of free-text terms to inventory keys.
//!
//! Scores every known key with the Ratcliff/Obershelp ratio `2 * M / T` (difflib) and
//! keeps the best one if it clears the cutoff. Ties go to the key seen first.

use difflib::sequencematcher::SequenceMatcher;
use serde::{Deserialize, Serialize};

use crate::config::{LENIENT_CUTOFF, STRICT_CUTOFF};

/// A term paired with a scored inventory key. Lives only for one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub term: String,
    pub key: String,
    /// Similarity in `0.0..=1.0`
    pub score: f64,
}

/// Matcher bound to one acceptance cutoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    cutoff: f64,
}

impl FuzzyMatcher {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    /// Cutoff for dish-category ingredients
    pub fn lenient() -> Self {
        Self::new(LENIENT_CUTOFF)
    }

    /// Cutoff for free-text tokens, which carry many incidental near-misses
    pub fn strict() -> Self {
        Self::new(STRICT_CUTOFF)
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Share of characters in matching blocks, in `0.0..=1.0`.
    ///
    /// Computed in `f64` from the matching blocks so a score landing exactly on a
    /// cutoff compares equal to it. Two empty strings score 1.0.
    pub fn similarity(key: &str, term: &str) -> f64 {
        let key: Vec<char> = key.chars().collect();
        let term: Vec<char> = term.chars().collect();
        let total = key.len() + term.len();
        if total == 0 {
            return 1.0;
        }

        let mut matcher: SequenceMatcher<char> = SequenceMatcher::new(&key, &term);
        let matched: usize = matcher
            .get_matching_blocks()
            .iter()
            .map(|block| block.size)
            .sum();
        2.0 * matched as f64 / total as f64
    }

    /// Highest-scoring key regardless of the cutoff.
    pub fn best_candidate<'k, I>(&self, term: &str, keys: I) -> Option<MatchCandidate>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut best: Option<(&str, f64)> = None;
        for key in keys {
            let score = Self::similarity(key, term);
            // strict `>` keeps the earliest key on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((key, score));
            }
        }

        best.map(|(key, score)| MatchCandidate {
            term: term.to_string(),
            key: key.to_string(),
            score,
        })
    }

    /// Best key if it meets the cutoff.
    pub fn accept<'k, I>(&self, term: &str, keys: I) -> Option<MatchCandidate>
    where
        I: IntoIterator<Item = &'k str>,
    {
        self.best_candidate(term, keys)
            .filter(|candidate| candidate.score >= self.cutoff)
    }

    /// Accepted key, or `term` unchanged when nothing qualifies (including no keys).
    pub fn closest_key<'k, I>(&self, term: &str, keys: I) -> String
    where
        I: IntoIterator<Item = &'k str>,
    {
        self.accept(term, keys)
            .map(|candidate| candidate.key)
            .unwrap_or_else(|| term.to_string())
    }
}

/// Resolves `term` against `known_keys` at the given cutoff.
pub fn find_closest_key(term: &str, known_keys: &[&str], cutoff: f64) -> String {
    FuzzyMatcher::new(cutoff).closest_key(term, known_keys.iter().copied())
}
