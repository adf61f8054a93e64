//! Conversation store over the chat history namespace.

use std::collections::BTreeMap;

use cosmic_core::conversation::{Conversation, ConversationStore};
use cosmic_core::error::Result;

use crate::json_storage::{JsonStorage, Namespace};

/// The persisted shape: email -> ordered conversations. A BTreeMap keeps
/// the blob byte-stable across rewrites.
type ChatHistory = BTreeMap<String, Vec<Conversation>>;

/// Per-user chat history backed by the chat history blob.
#[derive(Debug, Clone)]
pub struct LocalConversationStore {
    storage: JsonStorage,
}

impl LocalConversationStore {
    /// Creates a store over the given storage.
    pub fn new(storage: JsonStorage) -> Self {
        Self { storage }
    }

    fn history(&self) -> ChatHistory {
        self.storage.read_or_default(Namespace::ChatHistory)
    }
}

impl ConversationStore for LocalConversationStore {
    fn conversations_for(&self, email: &str) -> Vec<Conversation> {
        self.history().remove(email).unwrap_or_default()
    }

    fn save_conversations(&self, email: &str, conversations: Vec<Conversation>) -> Result<()> {
        let mut history = self.history();
        history.insert(email.to_string(), conversations);
        self.storage.write(Namespace::ChatHistory, &history)
    }

    fn delete_conversation(&self, email: &str, conversation_id: &str) -> Result<()> {
        let mut history = self.history();
        if let Some(conversations) = history.get_mut(email) {
            conversations.retain(|c| c.id != conversation_id);
            self.storage.write(Namespace::ChatHistory, &history)?;
        }
        Ok(())
    }
}
