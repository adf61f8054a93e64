//! Conversation store trait.

use crate::conversation::model::Conversation;
use crate::error::Result;

/// Per-user chat history, a mapping of email to an ordered sequence of
/// conversations.
///
/// A user's conversations are only ever read or written as a complete set;
/// concurrent writers are resolved last-writer-wins.
pub trait ConversationStore {
    /// Returns all conversations stored for `email`; empty when the key is
    /// absent or the blob cannot be read.
    fn conversations_for(&self, email: &str) -> Vec<Conversation>;

    /// Replaces the whole sequence stored for `email` and persists the
    /// mapping.
    fn save_conversations(&self, email: &str, conversations: Vec<Conversation>) -> Result<()>;

    /// Removes one conversation by id from `email`'s sequence.
    fn delete_conversation(&self, email: &str, conversation_id: &str) -> Result<()>;
}
