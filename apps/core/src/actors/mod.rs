//! Request handling: collaborator seams, the router and the actor that serves it.

pub mod fallback;
pub mod gemini;
pub mod messages;
pub mod router;
pub mod supervisor;
pub mod traits;
pub mod web_search;
