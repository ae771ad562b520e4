//! In-memory inventory and query log.
//!
//! Backs the inventory, query-log and trending capabilities for tests and small
//! deployments. Can be switched offline to behave like an unreachable database.

use crate::actors::messages::AppError;
use crate::actors::traits::{InventorySource, QueryLog, TrendingSource};
use crate::models::{InventorySnapshot, QueryLogEntry, TrendingDish};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct StoreState {
    stock: BTreeMap<String, i64>,
    log: Vec<QueryLogEntry>,
    offline: bool,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let stock = items
            .into_iter()
            .map(|(name, qty)| (normalize(name.as_ref()), qty))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self {
            state: Mutex::new(StoreState {
                stock,
                ..StoreState::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, AppError> {
        self.state
            .lock()
            .map_err(|e| AppError::Internal(format!("Store lock poisoned: {}", e)))
    }

    /// Like [`lock`](Self::lock), but refuses while the store is offline.
    fn lock_online(&self) -> Result<MutexGuard<'_, StoreState>, AppError> {
        let state = self.lock()?;
        if state.offline {
            return Err(AppError::Collaborator("Inventory store is offline".to_string()));
        }
        Ok(state)
    }

    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.lock() {
            state.offline = offline;
        }
    }

    /// Sets the stock of one item, adding it if unknown.
    pub fn set_stock(&self, name: &str, quantity: i64) -> Result<(), AppError> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(AppError::Validation("Item name must not be empty".to_string()));
        }
        self.lock()?.stock.insert(key, quantity);
        Ok(())
    }

    /// Appends a pre-built entry, keeping its timestamp.
    pub fn record(&self, entry: QueryLogEntry) -> Result<(), AppError> {
        self.lock()?.log.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> Result<Vec<QueryLogEntry>, AppError> {
        Ok(self.lock()?.log.clone())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[async_trait]
impl InventorySource for InMemoryStore {
    async fn fetch_inventory(&self) -> Result<InventorySnapshot, AppError> {
        let state = self.lock_online()?;
        Ok(InventorySnapshot::new(
            state.stock.iter().map(|(k, v)| (k.as_str(), *v)),
        ))
    }
}

#[async_trait]
impl QueryLog for InMemoryStore {
    async fn log_query(&self, user_text: &str, dish: &str) -> Result<(), AppError> {
        let entry = QueryLogEntry::new(user_text, dish);
        debug!(id = %entry.id, dish, "query logged");
        self.lock_online()?.log.push(entry);
        Ok(())
    }
}

#[async_trait]
impl TrendingSource for InMemoryStore {
    /// Counts entries per dish inside the window; ties are ordered by dish name.
    async fn fetch_recent_trending(&self, days: i64, limit: usize) -> Result<Vec<TrendingDish>, AppError> {
        let since = Utc::now() - Duration::days(days);
        let state = self.lock_online()?;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for entry in state.log.iter().filter(|e| e.timestamp >= since) {
            *counts.entry(entry.dish.as_str()).or_default() += 1;
        }

        let mut rows: Vec<TrendingDish> = counts
            .into_iter()
            .map(|(dish, count)| TrendingDish {
                dish: dish.to_string(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.dish.cmp(&b.dish)));
        rows.truncate(limit);
        Ok(rows)
    }
}
