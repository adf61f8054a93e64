//! Gemini REST client for the Cosmic explorer.
//!
//! Three call shapes, all against the `generativelanguage` v1beta API:
//! one-shot text generation (chat titles), structured JSON generation with
//! a fixed response schema (planet telemetry, with an offline fallback),
//! and streaming chat with search grounding.

pub mod chat;
pub mod error;
pub mod gemini;
pub mod planet;
pub mod retry;

pub use chat::{ChatChunk, ChatSession, generate_chat_title};
pub use error::AiError;
pub use gemini::{GeminiClient, GenerationConfig};
pub use planet::planet_details;
pub use retry::retry_with_backoff;
