use crate::models::InventorySnapshot;
use serde::Serialize;
use tokio::sync::oneshot;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The assistant actor is gone and can no longer accept requests.
    #[error("Assistant mailbox closed: {0}")]
    MailboxClosed(String),
    /// The request task finished without sending a reply.
    #[error("No reply from request task: {0}")]
    NoReply(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the assistant actor.
#[derive(Debug)]
pub enum AssistantMessage {
    /// Answer a request against a caller-supplied inventory snapshot.
    Answer {
        text: String,
        inventory: InventorySnapshot,
        /// A channel to send the final response text back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
    /// Answer a request after fetching the snapshot from the configured inventory source.
    Ask {
        text: String,
        responder: oneshot::Sender<Result<String, AppError>>,
    },
    /// A command to stop the actor loop.
    Shutdown,
}
