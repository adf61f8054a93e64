//! Local persistence for the Cosmic explorer.
//!
//! Every namespace is one JSON blob in one file under the application
//! directory; repositories read the whole blob, mutate an in-memory copy
//! and write the whole blob back. There is no locking and no partial
//! update; last writer wins.

pub mod community_store;
pub mod conversation_store;
pub mod json_storage;
pub mod paths;
pub mod secret;
pub mod stats_counter;
pub mod user_directory;

pub use community_store::LocalCommunityStore;
pub use conversation_store::LocalConversationStore;
pub use json_storage::{JsonStorage, Namespace};
pub use paths::CosmicPaths;
pub use secret::{GeminiSecret, SecretConfig, SecretStorage, SecretStorageError};
pub use stats_counter::LocalStatsCounter;
pub use user_directory::LocalUserDirectory;
