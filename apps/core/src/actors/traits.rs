use crate::actors::messages::AppError;
use crate::models::{InventoryInsight, InventorySnapshot, RecipeCard, TrendInsight, TrendingDish};
use async_trait::async_trait;

/// Defines the public interface for the inventory store.
///
/// Implementations report an unreachable store as an error; the caller turns that into
/// [`InventorySnapshot::unavailable`].
#[async_trait]
pub trait InventorySource: Send + Sync + 'static {
    /// Reads current stock levels.
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, AppError>;
}

/// Append-only sink for recipe queries.
#[async_trait]
pub trait QueryLog: Send + Sync + 'static {
    /// Records one recipe request. Callers ignore failures.
    async fn log_query(&self, user_text: &str, dish: &str) -> Result<(), AppError>;
}

/// Aggregated view over the query log.
#[async_trait]
pub trait TrendingSource: Send + Sync + 'static {
    /// Most requested dishes over the last `days`, highest count first, at most `limit` rows.
    async fn fetch_recent_trending(&self, days: i64, limit: usize) -> Result<Vec<TrendingDish>, AppError>;
}

/// Defines the public interface for the AI generator.
///
/// This trait abstracts the specific model backend, allowing a remote API or a test fake
/// to be used interchangeably. Every call may fail; the router falls back on its own.
#[async_trait]
pub trait AiGenerator: Send + Sync + 'static {
    /// Produces a recipe for `dish`, optionally grounded on looked-up reference text.
    async fn generate_recipe(&self, dish: &str, context: Option<&str>) -> Result<RecipeCard, AppError>;

    /// Analyzes an inventory question against the current stock.
    async fn generate_inventory_insight(
        &self,
        user_text: &str,
        inventory: &InventorySnapshot,
    ) -> Result<InventoryInsight, AppError>;

    /// Summarizes what has been trending.
    async fn generate_trend_insight(&self, recent: &[TrendingDish]) -> Result<TrendInsight, AppError>;
}

/// Best-effort lookup of reference text from a single external source.
#[async_trait]
pub trait TextLookup: Send + Sync + 'static {
    /// Returns `Ok(None)` when the source had nothing useful.
    async fn lookup(&self, query: &str) -> Result<Option<String>, AppError>;
}
