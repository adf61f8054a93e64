//! Community board domain module.
//!
//! # Module Structure
//!
//! - `model`: posts, comments and the post kind enum
//! - `repository`: the community store contract

mod model;
mod repository;

// Re-export public API
pub use model::{Comment, Post, PostKind};
pub use repository::CommunityStore;
