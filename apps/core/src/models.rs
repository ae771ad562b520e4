use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Point-in-time stock levels handed to a single request.
///
/// Keys are trimmed and lowercased on construction. `reachable` records whether the
/// inventory source answered at all, so an empty-but-reachable store can be told apart
/// from an unreachable one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    items: BTreeMap<String, i64>,
    reachable: bool,
}

impl InventorySnapshot {
    /// Builds a snapshot from a reachable source. Later duplicates overwrite earlier ones.
    pub fn new<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let items = items
            .into_iter()
            .filter_map(|(name, stock)| {
                let key = name.as_ref().trim().to_lowercase();
                (!key.is_empty()).then_some((key, stock))
            })
            .collect();

        Self {
            items,
            reachable: true,
        }
    }

    /// A snapshot for a source that could not be reached.
    pub fn unavailable() -> Self {
        Self {
            items: BTreeMap::new(),
            reachable: false,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.items.get(key).copied()
    }

    /// Inventory keys in their iteration order (sorted).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Structured recipe produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCard {
    pub dish_name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub cooking_time: String,
    #[serde(default)]
    pub difficulty: String,
}

/// Structured inventory analysis produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryInsight {
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub low_stock: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl InventoryInsight {
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
            && self.missing.is_empty()
            && self.low_stock.is_empty()
            && self.summary.trim().is_empty()
    }
}

/// Structured trend analysis produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendInsight {
    #[serde(default)]
    pub popular_dishes: Vec<String>,
    #[serde(default)]
    pub patterns: String,
    #[serde(default)]
    pub recommendations: String,
}

/// One aggregated row of the trending window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingDish {
    pub dish: String,
    pub count: u64,
}

impl fmt::Display for TrendingDish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} requests)", self.dish, self.count)
    }
}

/// A recipe request recorded in the query log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub id: Uuid,
    pub user_query: String,
    pub dish: String,
    pub timestamp: DateTime<Utc>,
}

impl QueryLogEntry {
    pub fn new(user_query: &str, dish: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_query: user_query.to_string(),
            dish: dish.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_normalizes_keys() {
        let snapshot = InventorySnapshot::new([("  Olive Oil ", 3), ("EGGS", 5), ("   ", 9)]);

        assert!(snapshot.is_reachable());
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("olive oil"), Some(3));
        assert_eq!(snapshot.get("eggs"), Some(5));
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["eggs", "olive oil"]);
    }

    #[test]
    fn test_unavailable_snapshot() {
        let snapshot = InventorySnapshot::unavailable();
        assert!(!snapshot.is_reachable());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_trending_dish_display() {
        let row = TrendingDish {
            dish: "pizza".to_string(),
            count: 4,
        };
        assert_eq!(row.to_string(), "pizza (4 requests)");
    }

    #[test]
    fn test_insight_defaults_from_partial_json() {
        let insight: InventoryInsight =
            serde_json::from_str(r#"{"summary": "All good"}"#).unwrap();
        assert!(insight.available.is_empty());
        assert!(!insight.is_empty());
    }
}
