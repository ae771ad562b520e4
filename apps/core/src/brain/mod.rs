//! # Brain Module
//!
//! Rule-based text understanding and inventory reasoning for ChefMate.
//! Runs on every request BEFORE any external generator is called.
//!
//! ## Components
//! - `domain`: keyword gate rejecting off-topic input
//! - `intent`: ordered regex intent classification
//! - `entities`: dish-name extraction
//! - `keywords`: stop-word filtering and candidate terms
//! - `fuzzy`: similarity matching against inventory keys
//! - `lexicon`: static dish, ingredient and recipe tables
//! - `inventory`: availability reports
//! - `context_packet`: per-request analysis structure
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod context_packet;
pub mod domain;
pub mod entities;
pub mod fuzzy;
pub mod intent;
pub mod inventory;
pub mod keywords;
pub mod lexicon;

// Re-export main types for convenience
pub use analyzer::BrainAnalyzer;
pub use context_packet::QueryAnalysis;
pub use domain::{is_in_domain, DomainGate};
pub use entities::{extract_dish_name, DishExtractor};
pub use fuzzy::{find_closest_key, FuzzyMatcher, MatchCandidate};
pub use intent::{classify_intent, Intent, IntentClassifier, IntentResult};
pub use inventory::{
    resolve_category, Availability, AvailabilityReport, FreeTextReport, IngredientStatus,
    InventoryAnalyzer,
};
pub use keywords::QueryTerms;
