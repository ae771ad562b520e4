//! Domain gate: a cheap keyword filter that rejects off-topic input before
//! any other classification runs.

/// Restaurant vocabulary. Presence of any entry (as a substring of the lowercased
/// text) puts the input in scope.
const DOMAIN_KEYWORDS: &[&str] = &[
    // food and dishes
    "recipe", "ingredients", "cook", "prepare", "dish", "menu", "burger", "pizza", "pasta",
    "salad", "soup", "cake", "bread", "chicken", "beef", "pork", "fish", "rice", "fries",
    "sandwich", "omelet", "omelette", "mushroom", "mushrooms",
    // drinks
    "drink", "juice", "water", "soda", "coffee", "tea",
    // inventory and kitchen operations
    "inventory", "stock", "available", "availability", "in stock", "order", "orders", "kitchen",
    "ingredient", "items",
    // supplies staff ask about
    "oil", "olive", "olive oil", "cheese", "cans", "buckets", "salt", "pepper",
];

/// Keyword gate over a fixed restaurant vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainGate;

impl DomainGate {
    pub fn new() -> Self {
        Self
    }

    /// Returns the first vocabulary entry found in `text`, if any.
    pub fn matched_keyword(&self, text: &str) -> Option<&'static str> {
        let text = text.to_lowercase();
        DOMAIN_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| text.contains(keyword))
    }

    pub fn is_in_domain(&self, text: &str) -> bool {
        self.matched_keyword(text).is_some()
    }
}

/// Convenience wrapper over [`DomainGate::is_in_domain`].
pub fn is_in_domain(text: &str) -> bool {
    DomainGate.is_in_domain(text)
}
