//! User directory trait.

use crate::error::Result;
use crate::user::model::{User, UserUpdate};

/// The user directory: registration, authentication and settings updates.
///
/// All operations are synchronous whole-collection read-modify-write cycles
/// against local storage. Expected failures (duplicate identity, invalid
/// credentials) come back as typed errors, never panics.
pub trait UserDirectory {
    /// Returns the full directory, empty on any read failure.
    fn all_users(&self) -> Vec<User>;

    /// Registers a new user.
    ///
    /// Fails with `DuplicateName` / `DuplicateEmail` when another user
    /// already holds the (case-insensitive) name or email. The admin-email
    /// rule is applied before the record is persisted.
    fn register(&self, user: User) -> Result<User>;

    /// Looks up a user by name or email (case-insensitive) and exact
    /// password; fails with `InvalidCredentials` otherwise.
    ///
    /// When the matched record carries the admin email but not the admin
    /// role, the role is corrected and persisted before returning.
    fn authenticate(&self, identifier: &str, password: &str) -> Result<User>;

    /// Merges a partial update onto the record located by `current.email`.
    ///
    /// A missing record is inserted as the merge of `current` and `update`
    /// (defensive fallback). Name or avatar changes cascade into the
    /// community store before the updated user is returned.
    fn update(&self, current: &User, update: UserUpdate) -> Result<User>;
}
