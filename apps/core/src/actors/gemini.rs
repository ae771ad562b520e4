use crate::actors::messages::AppError;
use crate::actors::traits::AiGenerator;
use crate::config::GeminiConfig;
use crate::models::{InventoryInsight, InventorySnapshot, RecipeCard, TrendInsight, TrendingDish};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, instrument};
use url::Url;
use validator::Validate;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Structured-output client for the Gemini `generateContent` endpoint.
///
/// Every call asks for a JSON response matching a schema and deserializes the first
/// candidate's text part into the target type.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        config.validate()?;
        let endpoint = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        ))?;

        Ok(Self {
            client: Client::new(),
            config,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: serde_json::Value,
    ) -> Result<T, AppError> {
        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });

        let res = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Collaborator(format!(
                "Gemini request failed with status {}: {}",
                status, body
            )));
        }

        let response: GenerateContentResponse = res.json().await?;
        let text = response
            .first_text()
            .ok_or_else(|| AppError::Collaborator("Gemini returned no candidate text".to_string()))?;

        Ok(serde_json::from_str(strip_code_fence(text))?)
    }
}

/// Models occasionally wrap JSON output in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn recipe_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dish_name": { "type": "STRING" },
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "instructions": { "type": "STRING" },
            "cooking_time": { "type": "STRING" },
            "difficulty": { "type": "STRING" }
        },
        "required": ["dish_name", "ingredients", "instructions", "cooking_time", "difficulty"]
    })
}

fn inventory_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "available": { "type": "ARRAY", "items": { "type": "STRING" } },
            "missing": { "type": "ARRAY", "items": { "type": "STRING" } },
            "low_stock": { "type": "ARRAY", "items": { "type": "STRING" } },
            "summary": { "type": "STRING" }
        },
        "required": ["available", "missing", "low_stock", "summary"]
    })
}

fn trend_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "popular_dishes": { "type": "ARRAY", "items": { "type": "STRING" } },
            "patterns": { "type": "STRING" },
            "recommendations": { "type": "STRING" }
        },
        "required": ["popular_dishes", "patterns", "recommendations"]
    })
}

#[async_trait]
impl AiGenerator for GeminiClient {
    #[instrument(skip(self, context))]
    async fn generate_recipe(&self, dish: &str, context: Option<&str>) -> Result<RecipeCard, AppError> {
        info!(model = %self.config.model, "Requesting recipe from Gemini");
        let prompt = format!(
            "You are a professional chef advising a restaurant kitchen. The user asked about: {dish}\n\n\
             Reference text from a web lookup (may be empty, use it as a base when present):\n{}\n\n\
             Give a recipe for {dish} with the ingredient list including quantities, step-by-step \
             instructions with practical tips, an estimated cooking time and a difficulty level.",
            context.unwrap_or("No reference text available")
        );
        self.generate_structured(prompt, recipe_schema()).await
    }

    #[instrument(skip(self, inventory), fields(items = inventory.len()))]
    async fn generate_inventory_insight(
        &self,
        user_text: &str,
        inventory: &InventorySnapshot,
    ) -> Result<InventoryInsight, AppError> {
        info!(model = %self.config.model, "Requesting inventory insight from Gemini");
        let stock: BTreeMap<&str, i64> = inventory.iter().collect();
        let prompt = format!(
            "You manage a restaurant's stock. Answer the query below using the current inventory.\n\n\
             Query: {user_text}\nCurrent inventory (name -> count):\n{}\n\n\
             List the available ingredients relevant to the query, the missing ones if a dish is \
             mentioned, any low-stock items, and a short actionable summary.",
            serde_json::to_string_pretty(&stock)?
        );
        self.generate_structured(prompt, inventory_schema()).await
    }

    #[instrument(skip(self, recent), fields(rows = recent.len()))]
    async fn generate_trend_insight(&self, recent: &[TrendingDish]) -> Result<TrendInsight, AppError> {
        info!(model = %self.config.model, "Requesting trend insight from Gemini");
        let rows = if recent.is_empty() {
            "No trending data available".to_string()
        } else {
            recent.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        let prompt = format!(
            "You analyze restaurant demand. Recent trending dishes: {rows}\n\n\
             Describe the current food trends, menu planning recommendations, seasonal \
             considerations and what customers seem to prefer."
        );
        self.generate_structured(prompt, trend_schema()).await
    }
}
