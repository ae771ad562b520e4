use crate::actors::messages::{ActorError, AppError, AssistantMessage};
use crate::actors::router::{Collaborators, QueryRouter};
use crate::actors::traits::{InventorySource, QueryLog, TrendingSource};
use crate::config::AssistantConfig;
use crate::models::InventorySnapshot;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, instrument, warn};

/// A handle to the assistant actor.
///
/// This is the entry point callers use. Each request is answered on its own task, so
/// distinct requests run in parallel and share nothing but the read-only router.
#[derive(Clone)]
pub struct AssistantHandle {
    sender: mpsc::Sender<AssistantMessage>,
}

impl AssistantHandle {
    /// Spawns the actor around an already-built router and returns a handle to it.
    pub fn new(router: QueryRouter) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = AssistantRunner {
            receiver,
            router: Arc::new(router),
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    pub fn with_collaborators(config: &AssistantConfig, collaborators: Collaborators) -> Self {
        Self::new(QueryRouter::new(config, collaborators))
    }

    /// Builds the production wiring: one store plus the HTTP adapters from `config`.
    pub fn from_config<S>(config: &AssistantConfig, store: Arc<S>) -> Result<Self, AppError>
    where
        S: InventorySource + QueryLog + TrendingSource,
    {
        let collaborators = Collaborators::from_config(config, store)?;
        Ok(Self::with_collaborators(config, collaborators))
    }

    /// Answers `text` against a caller-supplied snapshot.
    ///
    /// Never fails: an error that escapes the request (a panicked task, a stopped actor)
    /// is turned into an apologetic message carrying the error description.
    #[instrument(skip(self, text, inventory))]
    pub async fn answer(&self, text: impl Into<String>, inventory: InventorySnapshot) -> String {
        let text = text.into();
        let result = self
            .request(|responder| AssistantMessage::Answer {
                text,
                inventory,
                responder,
            })
            .await;
        into_response(result)
    }

    /// Like [`answer`](Self::answer), but reads the snapshot from the configured inventory source.
    #[instrument(skip(self, text))]
    pub async fn ask(&self, text: impl Into<String>) -> String {
        let text = text.into();
        let result = self
            .request(|responder| AssistantMessage::Ask { text, responder })
            .await;
        into_response(result)
    }

    /// Stops accepting requests. Requests already in flight still complete.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(AssistantMessage::Shutdown)
            .await
            .map_err(|e| ActorError::MailboxClosed(e.to_string()))?;
        Ok(())
    }

    async fn request<F>(&self, build: F) -> Result<String, AppError>
    where
        F: FnOnce(oneshot::Sender<Result<String, AppError>>) -> AssistantMessage,
    {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::MailboxClosed(e.to_string()))?;
        recv.await.map_err(|e| ActorError::NoReply(e.to_string()))?
    }
}

fn into_response(result: Result<String, AppError>) -> String {
    result.unwrap_or_else(|e| {
        error!("Error processing request: {}", e);
        format!("I encountered an error while processing your request: {}", e)
    })
}

// --- Actor Runner ---
struct AssistantRunner {
    receiver: mpsc::Receiver<AssistantMessage>,
    router: Arc<QueryRouter>,
}

impl AssistantRunner {
    async fn run(mut self) {
        info!("Assistant started");
        while let Some(msg) = self.receiver.recv().await {
            if !self.handle_message(msg) {
                break;
            }
        }
        info!("Assistant stopped");
    }

    /// Dispatches one message; returns `false` once the actor should stop.
    fn handle_message(&mut self, msg: AssistantMessage) -> bool {
        match msg {
            AssistantMessage::Answer {
                text,
                inventory,
                responder,
            } => {
                self.spawn_request(text, Some(inventory), responder);
                true
            }
            AssistantMessage::Ask { text, responder } => {
                self.spawn_request(text, None, responder);
                true
            }
            AssistantMessage::Shutdown => {
                info!("Assistant shutting down...");
                false
            }
        }
    }

    fn spawn_request(
        &self,
        text: String,
        inventory: Option<InventorySnapshot>,
        responder: oneshot::Sender<Result<String, AppError>>,
    ) {
        let router = Arc::clone(&self.router);
        tokio::spawn(async move {
            let result = process_request(router, text, inventory).await;
            if let Err(e) = &result {
                error!("Request task failed: {:?}", e);
            }
            let _ = responder.send(result);
        });
    }
}

/// Runs the request on its own task so a panic surfaces as a `JoinError`
/// instead of taking the reply channel down with it.
async fn process_request(
    router: Arc<QueryRouter>,
    text: String,
    inventory: Option<InventorySnapshot>,
) -> Result<String, AppError> {
    let task = tokio::spawn(async move {
        let inventory = match inventory {
            Some(snapshot) => snapshot,
            None => fetch_snapshot(router.inventory_source().as_ref()).await,
        };
        router.route(&text, &inventory).await
    });
    Ok(task.await?)
}

async fn fetch_snapshot(source: &dyn InventorySource) -> InventorySnapshot {
    match source.fetch_inventory().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Inventory source unavailable");
            InventorySnapshot::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::router::GENERAL_MESSAGE;
    use crate::store::InMemoryStore;

    fn handle_for(store: Arc<InMemoryStore>) -> AssistantHandle {
        let collaborators = Collaborators {
            inventory: store.clone(),
            query_log: store.clone(),
            trending: store,
            generator: None,
            lookup: None,
        };
        AssistantHandle::with_collaborators(&AssistantConfig::default(), collaborators)
    }

    #[tokio::test]
    async fn test_answer_general_query() {
        let handle = handle_for(Arc::new(InMemoryStore::new()));
        let response = handle
            .answer("What's on the menu?", InventorySnapshot::new([("salt", 3)]))
            .await;
        assert_eq!(response, GENERAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_ask_reads_store_inventory() {
        let store = Arc::new(InMemoryStore::with_stock([("salt", 7)]));
        let handle = handle_for(store);

        assert_eq!(handle.ask("How much salt is in stock?").await, "salt: 7");
    }

    #[tokio::test]
    async fn test_ask_with_offline_store_reports_unavailable() {
        let store = Arc::new(InMemoryStore::with_stock([("salt", 7)]));
        store.set_offline(true);
        let handle = handle_for(store);

        assert_eq!(
            handle.ask("How much salt is in stock?").await,
            "No inventory data available."
        );
    }

    #[tokio::test]
    async fn test_after_shutdown_answers_apologize() {
        let handle = handle_for(Arc::new(InMemoryStore::new()));
        handle.shutdown().await.unwrap();

        // Give the runner a moment to drop its receiver.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let response = handle.answer("pizza recipe", InventorySnapshot::unavailable()).await;
        assert!(response.starts_with("I encountered an error while processing your request:"));
    }
}
