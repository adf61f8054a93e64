//! User domain model.
//!
//! Users are identified by their display name and email, both of which are
//! unique (case-insensitive) within the directory. One fixed email address
//! is always elevated to the admin role by every write path that touches it.

use serde::{Deserialize, Serialize};

/// The one email address that always receives the admin role.
pub const ADMIN_EMAIL: &str = "darwinflorentino63@gmail.com";

/// Returns true when `email` is the designated admin address.
pub fn is_admin_email(email: &str) -> bool {
    email.eq_ignore_ascii_case(ADMIN_EMAIL)
}

/// User role within the community.
///
/// Serialized with the Spanish wire values the stored blobs use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "estudiante")]
    Student,
    #[serde(rename = "invitado")]
    Guest,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// The wire value, as stored in the JSON blobs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "estudiante",
            Role::Guest => "invitado",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
///
/// `password` is compared as-is at authentication time; see DESIGN.md for
/// the recorded decision on plaintext credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl User {
    /// Creates a new user with the given identity and role.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Some(password.into()),
            role: Some(role),
            avatar_url: None,
        }
    }

    /// Forces the admin role when this user's email is the designated
    /// admin address. Every write path applies this before persisting.
    pub fn apply_admin_rule(&mut self) {
        if is_admin_email(&self.email) {
            self.role = Some(Role::Admin);
        }
    }

    /// True when the trimmed, lowercased identifier matches this user's
    /// name or email.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let id = identifier.trim().to_lowercase();
        self.name.trim().to_lowercase() == id || self.email.to_lowercase() == id
    }

    /// The role recorded on posts and comments authored by this user.
    /// Users without an assigned role appear as guests.
    pub fn display_role(&self) -> Role {
        self.role.unwrap_or(Role::Guest)
    }
}

/// A partial settings change applied on top of an existing user record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserUpdate {
    /// Merges this update onto `user`, leaving absent fields untouched.
    pub fn merge_onto(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(password) = &self.password {
            user.password = Some(password.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
    }

    /// True when the change touches the fields denormalized into the
    /// community store (name or avatar), which require a cascade.
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.avatar_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_values() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "\"estudiante\"");
        assert_eq!(serde_json::to_string(&Role::Guest).unwrap(), "\"invitado\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::Guest.to_string(), "invitado");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let mut user = User::new("Ana", "ana@x.com", "secret", Role::Student);
        user.avatar_url = Some("https://example.com/a.png".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["avatarUrl"], "https://example.com/a.png");
        assert_eq!(json["role"], "estudiante");
    }

    #[test]
    fn test_admin_rule_is_case_insensitive() {
        let mut user = User::new("Darwin", "DarwinFlorentino63@GMAIL.com", "x", Role::Guest);
        user.apply_admin_rule();
        assert_eq!(user.role, Some(Role::Admin));

        let mut other = User::new("Ana", "ana@x.com", "x", Role::Guest);
        other.apply_admin_rule();
        assert_eq!(other.role, Some(Role::Guest));
    }

    #[test]
    fn test_matches_identifier() {
        let user = User::new("Ana", "ana@x.com", "x", Role::Student);
        assert!(user.matches_identifier("ana"));
        assert!(user.matches_identifier("  ANA@X.COM "));
        assert!(!user.matches_identifier("ana2"));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut user = User::new("Ana", "ana@x.com", "secret", Role::Student);
        let update = UserUpdate {
            name: Some("Ana2".to_string()),
            ..Default::default()
        };
        update.merge_onto(&mut user);
        assert_eq!(user.name, "Ana2");
        assert_eq!(user.password.as_deref(), Some("secret"));
        assert!(update.touches_identity());
        assert!(!UserUpdate::default().touches_identity());
    }
}
