//! Community board domain models.
//!
//! Posts and comments denormalize their author's display name and role;
//! identity changes are propagated by the community store's cascade.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::{Role, User};

/// The kind of community post, with the Spanish wire values the stored
/// blobs use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostKind {
    #[serde(rename = "opinion")]
    Opinion,
    #[serde(rename = "idea")]
    Idea,
    #[serde(rename = "aprendizaje")]
    Learning,
    #[serde(rename = "cambio")]
    Change,
}

/// A comment on a post, appended only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_name: String,
    pub user_role: Role,
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl Comment {
    /// Creates a new comment authored by `user`.
    pub fn new(user: &User, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user.name.clone(),
            user_role: user.display_role(),
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// A community post.
///
/// `likes` holds user names with toggle semantics: membership is flipped by
/// the store, so a name appears at most once. Order is an implementation
/// detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_name: String,
    pub user_role: Role,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl Post {
    /// Creates a new post authored by `user`, with no likes or comments yet.
    pub fn new(user: &User, text: impl Into<String>, kind: PostKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user.name.clone(),
            user_role: user.display_role(),
            text: text.into(),
            kind,
            likes: Vec::new(),
            comments: Vec::new(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Flips `user_name`'s membership in the like set. Returns true when
    /// the name was added, false when it was removed.
    pub fn toggle_like(&mut self, user_name: &str) -> bool {
        if let Some(pos) = self.likes.iter().position(|n| n == user_name) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user_name.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> User {
        User::new("Ana", "ana@x.com", "secret", Role::Student)
    }

    #[test]
    fn test_post_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&PostKind::Learning).unwrap(),
            "\"aprendizaje\""
        );
        assert_eq!(serde_json::to_string(&PostKind::Change).unwrap(), "\"cambio\"");
    }

    #[test]
    fn test_post_serializes_with_type_field() {
        let post = Post::new(&author(), "hola", PostKind::Opinion);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["type"], "opinion");
        assert_eq!(json["userName"], "Ana");
        assert_eq!(json["userRole"], "estudiante");
        assert!(json["likes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_like_round_trip() {
        let mut post = Post::new(&author(), "hola", PostKind::Idea);
        assert!(post.toggle_like("Luis"));
        assert_eq!(post.likes, vec!["Luis".to_string()]);
        // Second toggle with the same name restores the original set.
        assert!(!post.toggle_like("Luis"));
        assert!(post.likes.is_empty());
    }

    #[test]
    fn test_comment_carries_author_role() {
        let mut user = author();
        user.role = None;
        let comment = Comment::new(&user, "interesante");
        assert_eq!(comment.user_role, Role::Guest);
        assert!(!comment.id.is_empty());
    }
}
