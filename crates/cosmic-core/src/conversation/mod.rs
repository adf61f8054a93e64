//! Chat conversation domain module.
//!
//! # Module Structure
//!
//! - `model`: conversations, chat messages and grounding sources
//! - `repository`: the per-user conversation store contract

mod model;
mod repository;

// Re-export public API
pub use model::{ChatMessage, Conversation, GroundingSource, MessageRole};
pub use repository::ConversationStore;
