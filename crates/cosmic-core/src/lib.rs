//! Core domain models and repository contracts for the Cosmic explorer.
//!
//! This crate defines the shared error type, the persisted entities
//! (users, community posts, chat conversations, usage stats, planet
//! telemetry payloads) and the repository traits implemented by
//! `cosmic-infrastructure`.

pub mod community;
pub mod conversation;
pub mod error;
pub mod planet;
pub mod stats;
pub mod user;

// Re-export common error type
pub use error::{CosmicError, Result};
