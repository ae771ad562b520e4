//! Inventory Analyzer.
//!
//! Two entry points over one snapshot:
//! - `check_availability_for_dish`: resolve the dish to a category, then classify each
//!   required ingredient as available, low stock, or missing.
//! - `analyze_free_text_query`: find the inventory items a question mentions.
//!
//! Both are read-only with respect to the snapshot.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::fuzzy::FuzzyMatcher;
use super::keywords::QueryTerms;
use super::lexicon::{DishCategory, DISH_CATEGORIES, GENERIC_INGREDIENTS};
use crate::config::AnalyzerConfig;
use crate::models::InventorySnapshot;

/// Stock classification of one required ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    /// Available, but at or below the low-stock threshold
    LowStock,
    Missing,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available | Availability::LowStock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientStatus {
    /// Canonical ingredient name from the requirement set
    pub ingredient: String,
    /// Inventory key the ingredient resolved to, if any
    pub resolved_key: Option<String>,
    pub stock: i64,
    pub availability: Availability,
}

impl IngredientStatus {
    /// Name shown in the report: the inventory key when resolved, else the requirement.
    fn display_name(&self) -> &str {
        self.resolved_key.as_deref().unwrap_or(&self.ingredient)
    }
}

/// Availability of a dish's ingredients in one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub dish: String,
    /// Resolved category name; `None` when the generic ingredient set was used
    pub category: Option<&'static str>,
    pub statuses: Vec<IngredientStatus>,
    /// The snapshot had no entries at all
    pub inventory_empty: bool,
}

impl AvailabilityReport {
    pub fn available(&self) -> impl Iterator<Item = &IngredientStatus> {
        self.statuses.iter().filter(|s| s.availability.is_available())
    }

    pub fn low_stock(&self) -> impl Iterator<Item = &IngredientStatus> {
        self.statuses
            .iter()
            .filter(|s| s.availability == Availability::LowStock)
    }

    pub fn missing(&self) -> impl Iterator<Item = &IngredientStatus> {
        self.statuses
            .iter()
            .filter(|s| s.availability == Availability::Missing)
    }
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inventory_empty {
            return write!(
                f,
                "You don't have the ingredients needed for {}. The inventory is currently empty.",
                self.dish
            );
        }

        let mut parts = Vec::new();

        let available: Vec<String> = self
            .available()
            .map(|s| format!("{} ({})", s.display_name(), s.stock))
            .collect();
        if !available.is_empty() {
            parts.push(format!("Available: {}", available.join(", ")));
        }

        let low_stock: Vec<&str> = self.low_stock().map(IngredientStatus::display_name).collect();
        if !low_stock.is_empty() {
            parts.push(format!("Low stock: {}", low_stock.join(", ")));
        }

        let missing: Vec<&str> = self.missing().map(|s| s.ingredient.as_str()).collect();
        match missing.as_slice() {
            [] => {}
            [single] => parts.push(format!("You miss ingredient: {}", single)),
            many => parts.push(format!("You miss ingredients: {}", many.join(", "))),
        }

        if parts.is_empty() {
            return write!(f, "No ingredient information available.");
        }
        write!(f, "{}", parts.join(" | "))
    }
}

/// Answer to a free-text inventory question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FreeTextReport {
    /// The inventory source could not be reached
    Unavailable,
    /// The source answered with zero records
    Empty,
    /// Nothing in the text matched; carries a sample of known keys as a hint
    NotFound { known_sample: Vec<String> },
    /// Matched `(key, quantity)` pairs in match order
    Matched { items: Vec<(String, i64)> },
}

impl fmt::Display for FreeTextReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeTextReport::Unavailable => write!(f, "No inventory data available."),
            FreeTextReport::Empty => write!(f, "The inventory is currently empty."),
            FreeTextReport::NotFound { known_sample } => {
                write!(f, "I couldn't find those items in the inventory.")?;
                if !known_sample.is_empty() {
                    write!(f, " Known inventory items include: {}.", known_sample.join(", "))?;
                }
                Ok(())
            }
            FreeTextReport::Matched { items } => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|(name, qty)| format!("{}: {}", name, qty))
                    .collect();
                write!(f, "{}", parts.join(" | "))
            }
        }
    }
}

/// Resolves a dish name to a category.
///
/// 1. First category (table order) whose name is contained in the dish.
/// 2. Otherwise the category with the most dish words that are substrings of its name;
///    ties keep the earlier category.
/// 3. Otherwise `None`, meaning the generic ingredient set applies.
pub fn resolve_category(dish: &str) -> Option<&'static DishCategory> {
    let dish = dish.to_lowercase();

    if let Some(category) = DISH_CATEGORIES.iter().find(|c| dish.contains(c.name)) {
        return Some(category);
    }

    let words: Vec<&str> = dish.split_whitespace().collect();
    let mut best: Option<&'static DishCategory> = None;
    let mut best_score = 0;
    for category in DISH_CATEGORIES {
        let score = words.iter().filter(|w| category.name.contains(**w)).count();
        if score > best_score {
            best_score = score;
            best = Some(category);
        }
    }
    best
}

/// Inventory analyzer bound to one set of thresholds
#[derive(Debug, Clone)]
pub struct InventoryAnalyzer {
    low_stock_threshold: i64,
    hint_sample_size: usize,
    ingredient_matcher: FuzzyMatcher,
    term_matcher: FuzzyMatcher,
}

impl Default for InventoryAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl InventoryAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            low_stock_threshold: config.low_stock_threshold,
            hint_sample_size: config.hint_sample_size,
            ingredient_matcher: FuzzyMatcher::new(config.ingredient_cutoff),
            term_matcher: FuzzyMatcher::new(config.free_text_cutoff),
        }
    }

    /// Availability of the ingredients a dish needs.
    pub fn check_availability_for_dish(
        &self,
        dish: &str,
        inventory: &InventorySnapshot,
    ) -> AvailabilityReport {
        let category = resolve_category(dish);
        let required = category.map_or(GENERIC_INGREDIENTS, |c| c.ingredients);

        debug!(
            dish,
            category = category.map(|c| c.name).unwrap_or("generic"),
            "resolved dish category"
        );

        let mut report = self.analyze_ingredients(dish, required, inventory);
        report.category = category.map(|c| c.name);
        report
    }

    /// Classifies each required ingredient against the snapshot.
    pub fn analyze_ingredients(
        &self,
        dish: &str,
        required: &[&str],
        inventory: &InventorySnapshot,
    ) -> AvailabilityReport {
        if inventory.is_empty() {
            return AvailabilityReport {
                dish: dish.to_string(),
                category: None,
                statuses: vec![],
                inventory_empty: true,
            };
        }

        let statuses = required
            .iter()
            .map(|ingredient| self.classify_ingredient(ingredient, inventory))
            .collect();

        AvailabilityReport {
            dish: dish.to_string(),
            category: None,
            statuses,
            inventory_empty: false,
        }
    }

    fn classify_ingredient(&self, ingredient: &str, inventory: &InventorySnapshot) -> IngredientStatus {
        let closest = self.ingredient_matcher.closest_key(ingredient, inventory.keys());

        let Some(stock) = inventory.get(&closest) else {
            return IngredientStatus {
                ingredient: ingredient.to_string(),
                resolved_key: None,
                stock: 0,
                availability: Availability::Missing,
            };
        };

        let availability = if stock <= 0 {
            Availability::Missing
        } else if stock <= self.low_stock_threshold {
            Availability::LowStock
        } else {
            Availability::Available
        };

        IngredientStatus {
            ingredient: ingredient.to_string(),
            resolved_key: Some(closest),
            stock,
            availability,
        }
    }

    /// Finds the inventory items a free-text question mentions.
    ///
    /// Keys appearing verbatim in the text match first. Remaining candidate terms that
    /// are not substring-related to an already matched key go through the strict fuzzy
    /// matcher; only keys not matched yet are added.
    pub fn analyze_free_text_query(&self, text: &str, inventory: &InventorySnapshot) -> FreeTextReport {
        if inventory.is_empty() {
            return if inventory.is_reachable() {
                FreeTextReport::Empty
            } else {
                FreeTextReport::Unavailable
            };
        }

        let text_lower = text.to_lowercase();

        let mut matched: Vec<(String, i64)> = inventory
            .iter()
            .filter(|(key, _)| text_lower.contains(key))
            .map(|(key, stock)| (key.to_string(), stock))
            .collect();

        for term in QueryTerms::extract(&text_lower).candidates() {
            let subsumed = matched
                .iter()
                .any(|(key, _)| term.contains(key.as_str()) || key.contains(term.as_str()));
            if subsumed {
                continue;
            }

            let Some(candidate) = self.term_matcher.accept(&term, inventory.keys()) else {
                continue;
            };
            if matched.iter().any(|(key, _)| *key == candidate.key) {
                continue;
            }
            if let Some(stock) = inventory.get(&candidate.key) {
                debug!(term = %term, key = %candidate.key, score = candidate.score, "fuzzy inventory match");
                matched.push((candidate.key, stock));
            }
        }

        if matched.is_empty() {
            let known_sample = inventory
                .keys()
                .take(self.hint_sample_size)
                .map(str::to_string)
                .collect();
            return FreeTextReport::NotFound { known_sample };
        }

        FreeTextReport::Matched { items: matched }
    }
}
