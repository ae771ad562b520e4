//! # ChefMate Core
//!
//! Rule-based intent routing for a restaurant assistant. Free text plus an inventory
//! snapshot goes in; one response string comes out.
//!
//! - `brain`: domain gate, intent classification, dish extraction, fuzzy matching and
//!   availability analysis. Pure and synchronous.
//! - `actors`: the query router, its fallback chains, the external collaborators
//!   (Gemini, DuckDuckGo) and the request actor exposing `answer`.
//! - `store`: in-memory inventory and query log.

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use actors::router::{Collaborators, QueryRouter};
pub use actors::supervisor::AssistantHandle;
pub use config::AssistantConfig;
pub use error::AppError;
pub use models::InventorySnapshot;
pub use store::InMemoryStore;
