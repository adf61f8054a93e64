//! Error type for AI API calls.

use std::time::Duration;

use thiserror::Error;

/// Errors from the Gemini client.
///
/// `Process` carries enough structure for the retry layer to decide
/// whether an attempt may be repeated and how long to wait.
#[derive(Error, Debug, Clone)]
pub enum AiError {
    /// An HTTP-level failure, classified for retry.
    #[error("AI request failed (status {status_code:?}): {message}")]
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The call completed but produced no usable output.
    #[error("AI execution failed: {0}")]
    ExecutionFailed(String),

    /// The response body could not be decoded.
    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

impl AiError {
    /// Creates a process error without a retry hint.
    pub fn process(
        status_code: Option<u16>,
        message: impl Into<String>,
        is_retryable: bool,
    ) -> Self {
        Self::Process {
            status_code,
            message: message.into(),
            is_retryable,
            retry_after: None,
        }
    }

    /// True when another attempt may succeed (quota or transient
    /// server/transport failures).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Process { is_retryable: true, .. })
    }

    /// The server-supplied delay before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Process { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
