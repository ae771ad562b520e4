//! Intent Classification using regex patterns.
//!
//! Ordered rule evaluation: the domain gate runs first, then the recipe, inventory and
//! trending pattern families in that priority. The first family with a hit wins.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::domain::DomainGate;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Rejected by the domain gate
    OutOfDomain,
    /// Recipe / how-to request
    RecipeRequest,
    /// Stock or availability question
    InventoryCheck,
    /// Trending dishes / recommendations
    TrendingRequest,
    /// In domain but no pattern matched
    GeneralQuery,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the snake_case label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::OutOfDomain => "out_of_domain",
            Intent::RecipeRequest => "recipe_request",
            Intent::InventoryCheck => "inventory_check",
            Intent::TrendingRequest => "trending_request",
            Intent::GeneralQuery => "general_query",
        }
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// The text fragment (or gate keyword) that decided the intent, if any
    pub matched_pattern: Option<String>,
}

/// Pattern definition for intent matching
struct IntentPattern {
    intent: Intent,
    patterns: &'static [Regex],
}

/// Intent classifier using a domain gate plus ordered regex families
pub struct IntentClassifier {
    gate: DomainGate,
    patterns: Vec<IntentPattern>,
}

// Compile patterns once at startup. The patterns are literals, so a failure here is a bug.
static RECIPE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(recipe|how to (make|cook|prepare)|how do i (make|cook|prepare))\b")
            .expect("Invalid regex: recipe phrasing"),
        Regex::new(r"\b(give me the ingredients?\s+(of|for)|ingredients?\s+(of|for))\b")
            .expect("Invalid regex: ingredient-list phrasing"),
    ]
});

static INVENTORY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(stock|inventory|available|availability|in stock)\b")
            .expect("Invalid regex: stock words"),
        Regex::new(r"\b(have|need|how many|do we have|left)\b")
            .expect("Invalid regex: possession phrasing"),
        Regex::new(r"\b(quantity|count|units?)\b").expect("Invalid regex: quantity words"),
    ]
});

static TRENDING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"\b(trending|popular|recommend|suggestion)\b")
        .expect("Invalid regex: trending words")]
});

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with all patterns, in priority order
    pub fn new() -> Self {
        let patterns = vec![
            IntentPattern {
                intent: Intent::RecipeRequest,
                patterns: RECIPE_PATTERNS.as_slice(),
            },
            IntentPattern {
                intent: Intent::InventoryCheck,
                patterns: INVENTORY_PATTERNS.as_slice(),
            },
            IntentPattern {
                intent: Intent::TrendingRequest,
                patterns: TRENDING_PATTERNS.as_slice(),
            },
        ];

        Self {
            gate: DomainGate::new(),
            patterns,
        }
    }

    /// Classify the intent of a text. Always resolves.
    pub fn classify(&self, text: &str) -> IntentResult {
        let text = text.to_lowercase();

        if !self.gate.is_in_domain(&text) {
            return IntentResult {
                intent: Intent::OutOfDomain,
                matched_pattern: None,
            };
        }

        for pattern_group in &self.patterns {
            for pattern in pattern_group.patterns {
                if let Some(m) = pattern.find(&text) {
                    return IntentResult {
                        intent: pattern_group.intent,
                        matched_pattern: Some(m.as_str().to_string()),
                    };
                }
            }
        }

        IntentResult {
            intent: Intent::GeneralQuery,
            matched_pattern: self.gate.matched_keyword(&text).map(str::to_string),
        }
    }
}

/// Convenience wrapper returning only the intent.
pub fn classify_intent(text: &str) -> Intent {
    IntentClassifier::new().classify(text).intent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("How to make a burger?");
        assert_eq!(result.intent, Intent::RecipeRequest);
        assert_eq!(result.matched_pattern.as_deref(), Some("how to make"));

        let result = classifier.classify("Give me the ingredients for pizza");
        assert_eq!(result.intent, Intent::RecipeRequest);

        let result = classifier.classify("pasta recipe");
        assert_eq!(result.intent, Intent::RecipeRequest);
    }

    #[test]
    fn test_recipe_wins_over_inventory() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("Do we have the stock to cook? recipe for soup");
        assert_eq!(result.intent, Intent::RecipeRequest);
    }

    #[test]
    fn test_inventory_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("How many buckets of cheese are left");
        assert_eq!(result.intent, Intent::InventoryCheck);

        let result = classifier.classify("Is olive oil in stock");
        assert_eq!(result.intent, Intent::InventoryCheck);
    }

    #[test]
    fn test_trending_detection() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("What dishes are trending");
        assert_eq!(result.intent, Intent::TrendingRequest);
    }

    #[test]
    fn test_out_of_domain() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("What's the capital of France?");
        assert_eq!(result.intent, Intent::OutOfDomain);

        let result = classifier.classify("");
        assert_eq!(result.intent, Intent::OutOfDomain);
    }

    #[test]
    fn test_general_query() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("Tell me about the menu");
        assert_eq!(result.intent, Intent::GeneralQuery);
        assert_eq!(result.matched_pattern.as_deref(), Some("menu"));
    }

    #[test]
    fn test_word_boundaries() {
        // "cooker" passes the gate ("cook") but must not read as "how to cook".
        assert_eq!(classify_intent("how to cooker tips"), Intent::GeneralQuery);
        // "haven" must not read as "have".
        assert_eq!(classify_intent("a pizza haven"), Intent::GeneralQuery);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Intent::OutOfDomain.to_string(), "out_of_domain");
        assert_eq!(Intent::RecipeRequest.label(), "recipe_request");
    }
}
