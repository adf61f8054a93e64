//! Community store trait.

use crate::community::model::{Comment, Post};
use crate::error::Result;
use crate::user::User;

/// The community board: an append-only post list with likes and comments.
///
/// Post and comment mutations count as interactions on the stats record.
pub trait CommunityStore {
    /// Returns every post, newest first; empty on any read failure.
    fn posts(&self) -> Vec<Post>;

    /// Prepends a post and persists the collection.
    fn add_post(&self, post: Post) -> Result<()>;

    /// Toggles `user_name`'s like on the given post. A missing post is a
    /// silent no-op.
    fn toggle_like(&self, post_id: &str, user_name: &str) -> Result<()>;

    /// Appends a comment to the given post. A missing post is a silent
    /// no-op.
    fn add_comment(&self, post_id: &str, comment: Comment) -> Result<()>;

    /// Rewrites every post author, like entry and comment author recorded
    /// under `old_name` to `user`'s current name and role. Full scan; the
    /// collection is single-browser scale.
    fn apply_identity_change(&self, old_name: &str, user: &User) -> Result<()>;
}
