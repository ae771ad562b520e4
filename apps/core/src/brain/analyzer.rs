//! Brain Analyzer - front half of the request pipeline.
//!
//! Runs the domain gate and intent classifier, then dish extraction, and packages the
//! result for the router. Pure: no I/O, no shared state.

use chrono::Utc;
use std::time::Instant;
use tracing::debug;

use super::context_packet::QueryAnalysis;
use super::entities::DishExtractor;
use super::intent::IntentClassifier;

/// Main Brain analyzer that orchestrates the text-understanding components
#[derive(Default)]
pub struct BrainAnalyzer {
    intent_classifier: IntentClassifier,
    dish_extractor: DishExtractor,
}

impl BrainAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
            dish_extractor: DishExtractor::new(),
        }
    }

    /// Analyze a query and produce a query analysis packet
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let start = Instant::now();

        let mut packet = QueryAnalysis::new(query.to_string());
        packet.intent = self.intent_classifier.classify(query);
        packet.dish = self.dish_extractor.extract(query);
        packet.processing_time_ms = start.elapsed().as_millis() as u64;
        packet.timestamp = Utc::now();

        debug!(summary = %packet.summary(), "query analyzed");
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::intent::Intent;

    #[test]
    fn test_recipe_analysis() {
        let brain = BrainAnalyzer::new();

        let packet = brain.analyze("How to make lemon juice please");
        assert_eq!(packet.intent.intent, Intent::RecipeRequest);
        assert_eq!(packet.dish.as_deref(), Some("lemon juice"));
    }

    #[test]
    fn test_out_of_domain_analysis() {
        let brain = BrainAnalyzer::new();

        let packet = brain.analyze("Tell me a joke about cats");
        assert_eq!(packet.intent.intent, Intent::OutOfDomain);
        assert!(packet.dish.is_none());
    }

    #[test]
    fn test_recipe_without_dish() {
        let brain = BrainAnalyzer::new();

        let packet = brain.analyze("How do I cook?");
        assert_eq!(packet.intent.intent, Intent::RecipeRequest);
        assert!(packet.dish.is_none());
    }
}
