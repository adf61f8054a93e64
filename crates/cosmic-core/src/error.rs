//! Error types for the Cosmic application.

use thiserror::Error;

/// A shared error type for the Cosmic data layer.
///
/// Expected validation failures (duplicate identity, bad credentials) are
/// typed variants whose messages are shown to the user as-is; the remaining
/// variants cover infrastructure conditions.
#[derive(Error, Debug, Clone)]
pub enum CosmicError {
    /// The chosen user name is already taken (case-insensitive).
    #[error("El nombre de usuario ya está en uso.")]
    DuplicateName,

    /// The email address is already registered (case-insensitive).
    #[error("El correo ya está registrado.")]
    DuplicateEmail,

    /// No user matches the identifier/password pair.
    #[error("Credenciales inválidas.")]
    InvalidCredentials,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CosmicError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an expected validation failure (duplicate identity
    /// or invalid credentials), as opposed to an infrastructure error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName | Self::DuplicateEmail | Self::InvalidCredentials
        )
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for CosmicError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CosmicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CosmicError>`.
pub type Result<T> = std::result::Result<T, CosmicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variants_carry_user_facing_messages() {
        assert_eq!(
            CosmicError::DuplicateName.to_string(),
            "El nombre de usuario ya está en uso."
        );
        assert_eq!(
            CosmicError::DuplicateEmail.to_string(),
            "El correo ya está registrado."
        );
        assert_eq!(
            CosmicError::InvalidCredentials.to_string(),
            "Credenciales inválidas."
        );
        assert!(CosmicError::DuplicateName.is_validation());
        assert!(!CosmicError::internal("boom").is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CosmicError = io.into();
        assert!(matches!(err, CosmicError::Io { .. }));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CosmicError = parse_err.into();
        assert!(err.is_serialization());
    }
}
