//! Community store over the community namespace.

use cosmic_core::community::{Comment, CommunityStore, Post};
use cosmic_core::error::Result;
use cosmic_core::stats::StatsCounter;
use cosmic_core::user::User;

use crate::json_storage::{JsonStorage, Namespace};
use crate::stats_counter::LocalStatsCounter;

/// Community posts backed by the community blob.
///
/// Every successful mutation also counts one interaction on the stats
/// record.
#[derive(Debug, Clone)]
pub struct LocalCommunityStore {
    storage: JsonStorage,
    stats: LocalStatsCounter,
}

impl LocalCommunityStore {
    /// Creates a store over the given storage.
    pub fn new(storage: JsonStorage) -> Self {
        let stats = LocalStatsCounter::new(storage.clone());
        Self { storage, stats }
    }

    fn persist(&self, posts: &[Post]) -> Result<()> {
        self.storage.write(Namespace::Community, &posts)
    }
}

impl CommunityStore for LocalCommunityStore {
    fn posts(&self) -> Vec<Post> {
        self.storage.read_or_default(Namespace::Community)
    }

    fn add_post(&self, post: Post) -> Result<()> {
        let mut posts = self.posts();
        // New posts go to the front so the collection stays newest-first.
        posts.insert(0, post);
        self.persist(&posts)?;
        self.stats.increment_interactions()
    }

    fn toggle_like(&self, post_id: &str, user_name: &str) -> Result<()> {
        let mut posts = self.posts();
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(());
        };
        post.toggle_like(user_name);
        self.persist(&posts)?;
        self.stats.increment_interactions()
    }

    fn add_comment(&self, post_id: &str, comment: Comment) -> Result<()> {
        let mut posts = self.posts();
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(());
        };
        post.comments.push(comment);
        self.persist(&posts)?;
        self.stats.increment_interactions()
    }

    fn apply_identity_change(&self, old_name: &str, user: &User) -> Result<()> {
        let mut posts = self.posts();
        let new_role = user.display_role();

        for post in &mut posts {
            if post.user_name == old_name {
                post.user_name = user.name.clone();
                post.user_role = new_role;
            }
            for like in &mut post.likes {
                if like == old_name {
                    *like = user.name.clone();
                }
            }
            for comment in &mut post.comments {
                if comment.user_name == old_name {
                    comment.user_name = user.name.clone();
                    comment.user_role = new_role;
                }
            }
        }

        self.persist(&posts)
    }
}
