//! Query Analysis - Output structure for Brain analysis.
//!
//! Everything the router needs to know about one request before dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentResult};

/// Complete analysis of one user request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnalysis {
    /// Original user query
    pub query: String,

    /// Detected intent and the pattern that decided it
    pub intent: IntentResult,

    /// Extracted dish reference, if any
    pub dish: Option<String>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl QueryAnalysis {
    /// Create a new packet with no intent decided yet
    pub fn new(query: String) -> Self {
        Self {
            query,
            intent: IntentResult {
                intent: Intent::GeneralQuery,
                matched_pattern: None,
            },
            dish: None,
            processing_time_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Intent: {} ({}), Dish: {}",
            self.intent.intent,
            self.intent.matched_pattern.as_deref().unwrap_or("-"),
            self.dish.as_deref().unwrap_or("-"),
        )
    }
}
