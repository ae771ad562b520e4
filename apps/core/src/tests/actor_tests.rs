//! Actor System Tests
//!
//! Mock collaborators shared by the router and integration suites, plus tests for the
//! assistant actor: parallel requests, snapshot isolation and failure containment.

use crate::actors::messages::AppError;
use crate::actors::router::Collaborators;
use crate::actors::supervisor::AssistantHandle;
use crate::actors::traits::{AiGenerator, QueryLog, TextLookup};
use crate::config::AssistantConfig;
use crate::models::{InventoryInsight, InventorySnapshot, RecipeCard, TrendInsight, TrendingDish};
use crate::store::InMemoryStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

// ============================================================================
// Mock Collaborators
// ============================================================================

/// Mock generator with canned answers; a `None` answer makes that call fail.
#[derive(Default)]
pub struct MockGenerator {
    pub recipe: Option<RecipeCard>,
    pub insight: Option<InventoryInsight>,
    pub trend: Option<TrendInsight>,
    pub delay_ms: u64,
    pub calls: AtomicUsize,
    pub last_context: Mutex<Option<String>>,
    pub last_trending: Mutex<Vec<TrendingDish>>,
}

impl MockGenerator {
    /// Every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, card: RecipeCard) -> Self {
        self.recipe = Some(card);
        self
    }

    pub fn with_insight(mut self, insight: InventoryInsight) -> Self {
        self.insight = Some(insight);
        self
    }

    pub fn with_trend(mut self, trend: TrendInsight) -> Self {
        self.trend = Some(trend);
        self
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn unavailable() -> AppError {
        AppError::Collaborator("Mock generator unavailable".to_string())
    }
}

#[async_trait]
impl AiGenerator for MockGenerator {
    async fn generate_recipe(&self, _dish: &str, context: Option<&str>) -> Result<RecipeCard, AppError> {
        self.enter().await;
        *self.last_context.lock().unwrap() = context.map(str::to_string);
        self.recipe.clone().ok_or_else(Self::unavailable)
    }

    async fn generate_inventory_insight(
        &self,
        _user_text: &str,
        _inventory: &InventorySnapshot,
    ) -> Result<InventoryInsight, AppError> {
        self.enter().await;
        self.insight.clone().ok_or_else(Self::unavailable)
    }

    async fn generate_trend_insight(&self, recent: &[TrendingDish]) -> Result<TrendInsight, AppError> {
        self.enter().await;
        *self.last_trending.lock().unwrap() = recent.to_vec();
        self.trend.clone().ok_or_else(Self::unavailable)
    }
}

/// Generator whose inventory insight echoes the snapshot it was handed.
pub struct EchoGenerator {
    pub delay_ms: u64,
}

#[async_trait]
impl AiGenerator for EchoGenerator {
    async fn generate_recipe(&self, _dish: &str, _context: Option<&str>) -> Result<RecipeCard, AppError> {
        Err(AppError::Collaborator("recipes not supported".to_string()))
    }

    async fn generate_inventory_insight(
        &self,
        _user_text: &str,
        inventory: &InventorySnapshot,
    ) -> Result<InventoryInsight, AppError> {
        sleep(Duration::from_millis(self.delay_ms)).await;
        let seen: Vec<String> = inventory.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        Ok(InventoryInsight {
            summary: seen.join(","),
            ..Default::default()
        })
    }

    async fn generate_trend_insight(&self, _recent: &[TrendingDish]) -> Result<TrendInsight, AppError> {
        Err(AppError::Collaborator("trends not supported".to_string()))
    }
}

/// Generator that panics inside the request task.
pub struct PanickingGenerator;

#[async_trait]
impl AiGenerator for PanickingGenerator {
    async fn generate_recipe(&self, _dish: &str, _context: Option<&str>) -> Result<RecipeCard, AppError> {
        panic!("generator exploded");
    }

    async fn generate_inventory_insight(
        &self,
        _user_text: &str,
        _inventory: &InventorySnapshot,
    ) -> Result<InventoryInsight, AppError> {
        panic!("generator exploded");
    }

    async fn generate_trend_insight(&self, _recent: &[TrendingDish]) -> Result<TrendInsight, AppError> {
        panic!("generator exploded");
    }
}

/// Mock lookup with a canned result.
pub struct MockLookup {
    pub response: Result<Option<String>, AppError>,
    pub calls: AtomicUsize,
}

impl MockLookup {
    pub fn found(text: &str) -> Self {
        Self {
            response: Ok(Some(text.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            response: Ok(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Err(AppError::Http("lookup timed out".to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextLookup for MockLookup {
    async fn lookup(&self, _query: &str) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Query log that always fails.
#[derive(Default)]
pub struct FailingQueryLog {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl QueryLog for FailingQueryLog {
    async fn log_query(&self, _user_text: &str, _dish: &str) -> Result<(), AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Collaborator("query log unreachable".to_string()))
    }
}

/// Collaborators backed by `store`, with no generator and no lookup.
pub fn store_collaborators(store: Arc<InMemoryStore>) -> Collaborators {
    Collaborators {
        inventory: store.clone(),
        query_log: store.clone(),
        trending: store,
        generator: None,
        lookup: None,
    }
}

pub fn sample_card(dish: &str) -> RecipeCard {
    RecipeCard {
        dish_name: dish.to_string(),
        ingredients: vec!["lemon".to_string(), "water".to_string(), "sugar".to_string()],
        instructions: "Squeeze the lemons and stir.".to_string(),
        cooking_time: "5 minutes".to_string(),
        difficulty: "Easy".to_string(),
    }
}

// ============================================================================
// Assistant Actor Tests
// ============================================================================

#[cfg(test)]
mod assistant_tests {
    use super::*;

    fn handle_with_generator(generator: Arc<dyn AiGenerator>) -> AssistantHandle {
        let mut collaborators = store_collaborators(Arc::new(InMemoryStore::new()));
        collaborators.generator = Some(generator);
        AssistantHandle::with_collaborators(&AssistantConfig::default(), collaborators)
    }

    #[tokio::test]
    async fn test_concurrent_answers_use_their_own_snapshot() {
        let handle = handle_with_generator(Arc::new(EchoGenerator { delay_ms: 50 }));

        let mut tasks = vec![];
        for i in 0..20i64 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                let inventory = InventorySnapshot::new([("salt", i), ("oil", 100 + i)]);
                let response = handle.answer("How much salt is in stock?", inventory).await;
                (i, response)
            }));
        }

        for task in tasks {
            let (i, response) = task.await.unwrap();
            assert_eq!(
                response,
                format!("Summary: oil={},salt={}", 100 + i, i),
                "Request {} observed foreign state",
                i
            );
        }
    }

    #[tokio::test]
    async fn test_concurrent_answers_without_generator() {
        let handle = AssistantHandle::with_collaborators(
            &AssistantConfig::default(),
            store_collaborators(Arc::new(InMemoryStore::new())),
        );

        let (a, b) = tokio::join!(
            handle.answer("How much salt is in stock?", InventorySnapshot::new([("salt", 7)])),
            handle.answer("How much salt is in stock?", InventorySnapshot::new([("salt", 1)])),
        );

        assert_eq!(a, "salt: 7");
        assert_eq!(b, "salt: 1");
    }

    #[tokio::test]
    async fn test_requests_run_in_parallel() {
        let generator = Arc::new(MockGenerator::failing().with_recipe(sample_card("pizza")).with_delay(200));
        let handle = handle_with_generator(generator.clone());

        let start = std::time::Instant::now();
        let mut tasks = vec![];
        for _ in 0..10 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle.answer("Recipe for pizza", InventorySnapshot::new([("flour", 3)])).await
            }));
        }
        for task in tasks {
            let response = task.await.unwrap();
            assert!(response.starts_with("Pizza Recipe"), "Unexpected response: {}", response);
        }

        // Sequential handling would need at least 10 * 200ms.
        assert!(
            start.elapsed() < Duration::from_millis(1500),
            "Requests were processed sequentially: {:?}",
            start.elapsed()
        );
        assert_eq!(generator.call_count(), 10);
    }

    #[tokio::test]
    async fn test_panicking_request_is_contained() {
        let handle = handle_with_generator(Arc::new(PanickingGenerator));

        let response = handle
            .answer("Recipe for pizza", InventorySnapshot::new([("flour", 3)]))
            .await;
        assert!(
            response.starts_with(
                "I encountered an error while processing your request: Internal error: Request task failed"
            ),
            "Unexpected response: {}",
            response
        );

        // The actor keeps serving after a failed request.
        let response = handle
            .answer("Show me the menu", InventorySnapshot::new([("flour", 3)]))
            .await;
        assert_eq!(response, crate::actors::router::GENERAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_handle_is_cloneable_across_tasks() {
        let store = Arc::new(InMemoryStore::with_stock([("cheese", 4)]));
        let handle = AssistantHandle::with_collaborators(&AssistantConfig::default(), store_collaborators(store));
        let other = handle.clone();

        let response = tokio::spawn(async move { other.ask("Do we have cheese?").await })
            .await
            .unwrap();
        assert_eq!(response, "cheese: 4");
    }
}
