//! Query router: turns one analyzed request into one response string.
//!
//! Intent dispatch:
//! - out of domain -> refusal
//! - recipe with a dish -> log the query, then generator / lookup / basic recipe / tips
//! - recipe without a dish -> clarification
//! - inventory check -> generator insight, else the analyzer's free-text report
//! - trending -> generator trend insight, else plain summary, else "no data"
//! - general -> help prompt
//!
//! Collaborator failures never leave this module; each answer path resolves through a
//! [`FallbackChain`] with a terminal value.

use crate::actors::fallback::FallbackChain;
use crate::actors::gemini::GeminiClient;
use crate::actors::messages::AppError;
use crate::actors::traits::{AiGenerator, InventorySource, QueryLog, TextLookup, TrendingSource};
use crate::actors::web_search::DuckDuckGoLookup;
use crate::brain::lexicon::{basic_recipe_for, generic_cooking_tips};
use crate::brain::{BrainAnalyzer, Intent, InventoryAnalyzer};
use crate::config::{AssistantConfig, TrendingConfig};
use crate::models::{InventoryInsight, InventorySnapshot, RecipeCard, TrendInsight, TrendingDish};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const REFUSAL_MESSAGE: &str =
    "I can only answer restaurant topics such as recipes, ingredients, menu items, and inventory.";
pub const CLARIFICATION_MESSAGE: &str = "I'd be happy to help you with a recipe! Could you please specify what dish you'd like to make? For example: 'How to make lemon juice' or 'Recipe for pizza'.";
pub const GENERAL_MESSAGE: &str =
    "I can help you with recipes, ingredient checks, and restaurant insights. What would you like to know?";
pub const NO_TRENDING_MESSAGE: &str = "No trending data available yet.";

/// External capabilities the router delegates to.
#[derive(Clone)]
pub struct Collaborators {
    pub inventory: Arc<dyn InventorySource>,
    pub query_log: Arc<dyn QueryLog>,
    pub trending: Arc<dyn TrendingSource>,
    /// `None` disables every generator step.
    pub generator: Option<Arc<dyn AiGenerator>>,
    /// `None` disables reference-text lookup.
    pub lookup: Option<Arc<dyn TextLookup>>,
}

impl Collaborators {
    /// Wires one store for inventory, query log and trending, plus the HTTP adapters
    /// described by `config`.
    pub fn from_config<S>(config: &AssistantConfig, store: Arc<S>) -> Result<Self, AppError>
    where
        S: InventorySource + QueryLog + TrendingSource,
    {
        let generator = match &config.gemini {
            Some(gemini) => {
                let client = GeminiClient::new(gemini.clone())?;
                info!(model = client.model(), "Gemini generator enabled");
                Some(Arc::new(client) as Arc<dyn AiGenerator>)
            }
            None => {
                info!("No Gemini API key configured, generator disabled");
                None
            }
        };
        let lookup: Arc<dyn TextLookup> = Arc::new(DuckDuckGoLookup::new(&config.lookup)?);

        Ok(Self {
            inventory: store.clone(),
            query_log: store.clone(),
            trending: store,
            generator,
            lookup: Some(lookup),
        })
    }
}

/// Stateless across requests: every field is read-only after construction.
pub struct QueryRouter {
    brain: BrainAnalyzer,
    analyzer: InventoryAnalyzer,
    trending: TrendingConfig,
    collaborators: Collaborators,
}

impl QueryRouter {
    pub fn new(config: &AssistantConfig, collaborators: Collaborators) -> Self {
        Self {
            brain: BrainAnalyzer::new(),
            analyzer: InventoryAnalyzer::new(&config.analyzer),
            trending: config.trending.clone(),
            collaborators,
        }
    }

    pub fn inventory_source(&self) -> &Arc<dyn InventorySource> {
        &self.collaborators.inventory
    }

    /// Produces the response for one request against the given snapshot.
    #[instrument(skip(self, inventory), fields(items = inventory.len(), reachable = inventory.is_reachable()))]
    pub async fn route(&self, text: &str, inventory: &InventorySnapshot) -> String {
        let analysis = self.brain.analyze(text);
        info!(intent = %analysis.intent.intent, dish = ?analysis.dish, "routing request");

        match (analysis.intent.intent, analysis.dish) {
            (Intent::OutOfDomain, _) => REFUSAL_MESSAGE.to_string(),
            (Intent::RecipeRequest, Some(dish)) => self.answer_recipe(text, &dish, inventory).await,
            (Intent::RecipeRequest, None) => CLARIFICATION_MESSAGE.to_string(),
            (Intent::InventoryCheck, _) => self.answer_inventory(text, inventory).await,
            (Intent::TrendingRequest, _) => self.answer_trending().await,
            (Intent::GeneralQuery, _) => GENERAL_MESSAGE.to_string(),
        }
    }

    async fn record_query(&self, text: &str, dish: &str) {
        if let Err(e) = self.collaborators.query_log.log_query(text, dish).await {
            warn!(error = %e, dish, "Failed to log query");
        }
    }

    /// Best-effort; looked up once per request and shared by the recipe steps.
    async fn reference_text(&self, dish: &str) -> Option<String> {
        let lookup = self.collaborators.lookup.as_ref()?;
        match lookup.lookup(dish).await {
            Ok(text) => text.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, dish, "Reference lookup failed");
                None
            }
        }
    }

    async fn answer_recipe(&self, text: &str, dish: &str, inventory: &InventorySnapshot) -> String {
        self.record_query(text, dish).await;

        let availability = self
            .analyzer
            .check_availability_for_dish(dish, inventory)
            .to_string();
        let reference = self.reference_text(dish).await;

        let mut chain = FallbackChain::new("recipe");

        if let Some(generator) = &self.collaborators.generator {
            let availability = &availability;
            let reference = reference.as_deref();
            chain = chain.step("generator", async move {
                let card = generator.generate_recipe(dish, reference).await?;
                Ok(Some(format!(
                    "{}\n\nInventory Status:\n{}",
                    render_recipe_card(&card),
                    availability
                )))
            });
        }

        chain
            .step("lookup", async {
                Ok(reference
                    .as_ref()
                    .map(|text| format!("{}\n\n{}", text, availability)))
            })
            .step("basic recipe", async {
                Ok(basic_recipe_for(dish).map(|recipe| format!("{}\n\n{}", recipe, availability)))
            })
            .resolve(|| format!("{}\n\n{}", generic_cooking_tips(dish), availability))
            .await
    }

    async fn answer_inventory(&self, text: &str, inventory: &InventorySnapshot) -> String {
        let mut chain = FallbackChain::new("inventory");

        if let Some(generator) = &self.collaborators.generator {
            chain = chain.step("generator", async move {
                let insight = generator.generate_inventory_insight(text, inventory).await?;
                Ok((!insight.is_empty()).then(|| render_inventory_insight(&insight)))
            });
        }

        chain
            .resolve(|| self.analyzer.analyze_free_text_query(text, inventory).to_string())
            .await
    }

    async fn answer_trending(&self) -> String {
        let mut chain = FallbackChain::new("trending");

        if let Some(generator) = &self.collaborators.generator {
            chain = chain.step("generator", async move {
                // The insight is still requested over an empty window.
                let recent = self
                    .recent_trending(self.trending.insight_window_days)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "Failed to fetch trending window for insight");
                        Vec::new()
                    });
                let insight = generator.generate_trend_insight(&recent).await?;
                Ok(Some(render_trend_insight(&insight)))
            });
        }

        chain
            .step("summary", async {
                let recent = self.recent_trending(self.trending.summary_window_days).await?;
                Ok(render_trending_summary(&recent))
            })
            .resolve(|| NO_TRENDING_MESSAGE.to_string())
            .await
    }

    async fn recent_trending(&self, days: i64) -> Result<Vec<TrendingDish>, AppError> {
        self.collaborators
            .trending
            .fetch_recent_trending(days, self.trending.limit)
            .await
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn render_recipe_card(card: &RecipeCard) -> String {
    format!(
        "{} Recipe\n\nIngredients:\n{}\n\nInstructions:\n{}\n\nCooking Time: {}\nDifficulty: {}",
        title_case(&card.dish_name),
        card.ingredients.join(", "),
        card.instructions.trim(),
        card.cooking_time,
        card.difficulty
    )
}

pub fn render_inventory_insight(insight: &InventoryInsight) -> String {
    let mut lines = Vec::new();
    if !insight.available.is_empty() {
        lines.push(format!("Available: {}", insight.available.join(", ")));
    }
    if !insight.missing.is_empty() {
        lines.push(format!("Missing: {}", insight.missing.join(", ")));
    }
    if !insight.low_stock.is_empty() {
        lines.push(format!("Low Stock: {}", insight.low_stock.join(", ")));
    }
    if !insight.summary.trim().is_empty() {
        lines.push(format!("Summary: {}", insight.summary.trim()));
    }
    lines.join("\n")
}

pub fn render_trend_insight(insight: &TrendInsight) -> String {
    let popular = if insight.popular_dishes.is_empty() {
        "Based on recent data".to_string()
    } else {
        insight.popular_dishes.join(", ")
    };
    format!(
        "Restaurant Trends Analysis\n\nPopular Dishes: {}\n\nTrending Patterns: {}\n\nRecommendations: {}",
        popular, insight.patterns, insight.recommendations
    )
}

/// `None` for an empty window so the caller can fall through.
pub fn render_trending_summary(recent: &[TrendingDish]) -> Option<String> {
    if recent.is_empty() {
        return None;
    }
    let rows: Vec<String> = recent.iter().map(ToString::to_string).collect();
    Some(format!("Recent trending dishes: {}", rows.join(", ")))
}
