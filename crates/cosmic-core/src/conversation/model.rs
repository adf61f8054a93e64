//! Chat conversation domain models.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title for a conversation that has not been auto-titled yet.
pub const NEW_CONVERSATION_TITLE: &str = "Nueva Consulta";

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

/// A web source cited by the assistant via search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

impl ChatMessage {
    /// A plain user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
            image: None,
            sources: None,
        }
    }

    /// A model reply, optionally carrying grounding sources.
    pub fn model(text: impl Into<String>, sources: Option<Vec<GroundingSource>>) -> Self {
        Self {
            role: MessageRole::Model,
            text: text.into(),
            image: None,
            sources,
        }
    }
}

/// A chat conversation owned by exactly one user (keyed by email in the
/// conversation store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Creates an empty conversation with the default title.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: NEW_CONVERSATION_TITLE.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            messages: Vec::new(),
        }
    }

    /// True while the conversation still carries a default title and is
    /// eligible for auto-titling from its first message.
    pub fn needs_title(&self) -> bool {
        self.title == NEW_CONVERSATION_TITLE || self.title == "Nueva Conversación"
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_wire_values() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&MessageRole::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_new_conversation_needs_title() {
        let mut conv = Conversation::new();
        assert!(conv.needs_title());
        conv.title = "Anillos de Saturno".to_string();
        assert!(!conv.needs_title());
    }

    #[test]
    fn test_message_omits_absent_fields() {
        let json = serde_json::to_value(ChatMessage::user("hola")).unwrap();
        assert!(json.get("image").is_none());
        assert!(json.get("sources").is_none());
    }
}
