use crate::actors::messages::AppError;
use crate::actors::traits::TextLookup;
use crate::config::LookupConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;
use validator::Validate;

/// Words appended to every query so the instant-answer API leans towards recipes.
const QUERY_SUFFIX: &str =
    "recipe ingredients instructions how to make step by step cooking method preparation";

/// Related topics only count when they read like cooking content.
const COOKING_MARKERS: &[&str] = &[
    "recipe",
    "ingredient",
    "how to",
    "cook",
    "prepare",
    "make",
    "step",
    "method",
];

const MIN_TEXT_CHARS: usize = 20;
const MAX_RELATED_TOPICS: usize = 8;

/// Reference-text lookup against the DuckDuckGo Instant Answer API.
#[derive(Clone)]
pub struct DuckDuckGoLookup {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default, rename = "Abstract")]
    abstract_text: String,
    // Entries are either `{ "Text": .. }` or nested groups `{ "Name": .., "Topics": [..] }`.
    #[serde(default)]
    related_topics: Vec<serde_json::Value>,
}

impl DuckDuckGoLookup {
    pub fn new(config: &LookupConfig) -> Result<Self, AppError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.base_url)?,
        })
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_substantial(text: &str) -> bool {
    text.chars().count() > MIN_TEXT_CHARS
}

/// Picks the abstract when it is substantial, else the first cooking-flavoured topic.
fn best_text(answer: &InstantAnswer) -> Option<String> {
    let abstract_text = collapse_whitespace(&answer.abstract_text);
    if is_substantial(&abstract_text) {
        return Some(abstract_text);
    }

    answer
        .related_topics
        .iter()
        .take(MAX_RELATED_TOPICS)
        .filter_map(|topic| topic.get("Text").and_then(|t| t.as_str()))
        .map(collapse_whitespace)
        .find(|text| {
            let lower = text.to_lowercase();
            is_substantial(text) && COOKING_MARKERS.iter().any(|m| lower.contains(m))
        })
}

#[async_trait]
impl TextLookup for DuckDuckGoLookup {
    #[instrument(skip(self))]
    async fn lookup(&self, query: &str) -> Result<Option<String>, AppError> {
        info!("Looking up reference text");
        let q = format!("{} {}", query, QUERY_SUFFIX);

        let answer: InstantAnswer = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("q", q.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = best_text(&answer);
        debug!(found = text.is_some(), "lookup finished");
        Ok(text)
    }
}
