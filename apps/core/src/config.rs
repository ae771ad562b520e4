//! Assistant configuration.
//!
//! Every knob is carried in an explicit struct handed to constructors.
//! `AssistantConfig::from_env` is the only place that touches the process environment.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

/// Stock at or below this count (and above zero) is reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 2;
/// Similarity cutoff for resolving a dish-category ingredient against the inventory.
pub const LENIENT_CUTOFF: f64 = 0.6;
/// Similarity cutoff for resolving a free-text term against the inventory.
pub const STRICT_CUTOFF: f64 = 0.82;
/// How many inventory keys are offered as a hint when nothing matched.
pub const HINT_SAMPLE_SIZE: usize = 5;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://api.duckduckgo.com/";

/// Thresholds used by the inventory analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalyzerConfig {
    #[validate(range(min = 0))]
    pub low_stock_threshold: i64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub ingredient_cutoff: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub free_text_cutoff: f64,
    pub hint_sample_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            ingredient_cutoff: LENIENT_CUTOFF,
            free_text_cutoff: STRICT_CUTOFF,
            hint_sample_size: HINT_SAMPLE_SIZE,
        }
    }
}

/// Windows used when summarizing the query log.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrendingConfig {
    /// Days of history handed to the generator for trend insight.
    #[validate(range(min = 1))]
    pub insight_window_days: i64,
    /// Days of history used for the plain trending summary.
    #[validate(range(min = 1))]
    pub summary_window_days: i64,
    #[validate(range(min = 1))]
    pub limit: usize,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            insight_window_days: 7,
            summary_window_days: 3,
            limit: 3,
        }
    }
}

/// Credentials and endpoint for the Gemini generator.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct GeminiConfig {
    #[validate(length(min = 1))]
    pub api_key: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(url)]
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Endpoint for the external text lookup.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LookupConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(range(min = 1, max = 120))]
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AssistantConfig {
    #[validate(nested)]
    pub analyzer: AnalyzerConfig,
    #[validate(nested)]
    pub trending: TrendingConfig,
    /// `None` when no API key is configured; the generator is then disabled.
    #[validate(nested)]
    pub gemini: Option<GeminiConfig>,
    #[validate(nested)]
    pub lookup: LookupConfig,
}

impl AssistantConfig {
    /// Loads `.env` (if present) and reads the assistant settings from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Some(api_key) = non_empty_var("GOOGLE_API_KEY") {
            let mut gemini = GeminiConfig::new(api_key);
            if let Some(model) = non_empty_var("GEMINI_MODEL") {
                gemini.model = model;
            }
            if let Some(base_url) = non_empty_var("GEMINI_BASE_URL") {
                gemini.base_url = base_url;
            }
            config.gemini = Some(gemini);
        }

        if let Some(base_url) = non_empty_var("LOOKUP_BASE_URL") {
            config.lookup.base_url = base_url;
        }
        if let Some(raw) = non_empty_var("LOOKUP_TIMEOUT_SECS") {
            config.lookup.timeout_secs = raw
                .parse()
                .map_err(|_| AppError::Config(format!("LOOKUP_TIMEOUT_SECS is not a number: {}", raw)))?;
        }
        if let Some(raw) = non_empty_var("LOW_STOCK_THRESHOLD") {
            config.analyzer.low_stock_threshold = raw
                .parse()
                .map_err(|_| AppError::Config(format!("LOW_STOCK_THRESHOLD is not a number: {}", raw)))?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
