//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: user record, role enum and the admin-email rule
//! - `repository`: the user directory contract

mod model;
mod repository;

// Re-export public API
pub use model::{ADMIN_EMAIL, Role, User, UserUpdate, is_admin_email};
pub use repository::UserDirectory;
