//! Dish-name extraction.
//!
//! Tries an ordered list of phrasing patterns first, then falls back to direct
//! containment of known food phrases.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::lexicon::FOOD_LEXICON;

// Order matters: the first pattern that yields a usable name wins.
static EXTRACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"how to (?:make|cook|prepare)\s+([a-zA-Z\s]+)",
        r"recipe for\s+([a-zA-Z\s]+)",
        r"ingredients of\s+([a-zA-Z\s]+)",
        r"ingredient of\s+([a-zA-Z\s]+)",
        r"how to\s+([a-zA-Z\s]+)",
        r"([a-zA-Z\s]+)\s+recipe",
        r"ingredients for\s+([a-zA-Z\s]+)",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("Invalid regex: dish extraction pattern"))
    .collect()
});

static TRAILING_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(please|thanks|thank you|ask)\s*$").expect("Invalid regex: trailing filler")
});

/// Pulls a dish reference out of free text
#[derive(Debug, Clone, Copy, Default)]
pub struct DishExtractor;

impl DishExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the lowercased dish name, or `None` when no dish could be identified.
    pub fn extract(&self, text: &str) -> Option<String> {
        let text = text.to_lowercase();

        for pattern in EXTRACTION_PATTERNS.iter() {
            let Some(captured) = pattern.captures(&text).and_then(|c| c.get(1)) else {
                continue;
            };
            let dish = strip_trailing_filler(captured.as_str().trim());
            if dish.chars().count() > 1 {
                debug!(pattern = pattern.as_str(), dish = %dish, "dish extracted by pattern");
                return Some(dish);
            }
        }

        FOOD_LEXICON
            .iter()
            .find(|food| text.contains(*food))
            .map(|food| food.to_string())
    }
}

/// Removes one trailing politeness word.
fn strip_trailing_filler(candidate: &str) -> String {
    TRAILING_FILLER.replace(candidate, "").trim().to_string()
}

/// Convenience wrapper over [`DishExtractor::extract`].
pub fn extract_dish_name(text: &str) -> Option<String> {
    DishExtractor.extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_how_to_make_strips_please() {
        assert_eq!(
            extract_dish_name("How to make lemon juice please"),
            Some("lemon juice".to_string())
        );
    }

    #[test]
    fn test_recipe_for() {
        assert_eq!(
            extract_dish_name("Recipe for Mushroom Salad, thanks"),
            Some("mushroom salad".to_string())
        );
    }

    #[test]
    fn test_trailing_recipe_phrase() {
        assert_eq!(
            extract_dish_name("grandma apple pie recipe"),
            Some("grandma apple pie".to_string())
        );
    }

    #[test]
    fn test_ingredients_of() {
        assert_eq!(
            extract_dish_name("give me the ingredients of tiramisu"),
            Some("tiramisu".to_string())
        );
    }

    #[test]
    fn test_lexicon_fallback() {
        assert_eq!(
            extract_dish_name("is the pizza oven hot?"),
            Some("pizza".to_string())
        );
    }

    #[test]
    fn test_no_dish() {
        assert_eq!(extract_dish_name("what can you do?"), None);
        assert_eq!(extract_dish_name(""), None);
    }

    #[test]
    fn test_single_letter_capture_is_rejected() {
        // "how to x" captures "x"; too short, so the lexicon fallback runs
        assert_eq!(extract_dish_name("how to x"), None);
    }
}
