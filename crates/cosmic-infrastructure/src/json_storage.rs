//! JSON namespace storage — the raw adapter under every repository.
//!
//! Each namespace is a single JSON file that is read and rewritten whole.
//! Reads are tolerant: a missing file or an unparseable blob yields the
//! namespace's default value (the failure is logged, never propagated),
//! so a corrupted namespace silently self-heals on the next write.

use std::fs;
use std::path::{Path, PathBuf};

use cosmic_core::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::paths::CosmicPaths;

/// The fixed storage namespaces. One file each, nothing else is ever
/// written under the base directory by this adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// The user directory.
    Users,
    /// Community posts.
    Community,
    /// The email -> conversations mapping.
    ChatHistory,
    /// Visit/interaction counters.
    Stats,
}

impl Namespace {
    /// The file backing this namespace, relative to the base directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Namespace::Users => "db_v1.json",
            Namespace::Community => "community_v1.json",
            Namespace::ChatHistory => "chat_history_v1.json",
            Namespace::Stats => "stats_v1.json",
        }
    }
}

/// Whole-blob JSON storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    base_dir: PathBuf,
}

impl JsonStorage {
    /// Creates storage rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Creates storage at the platform default location
    /// (`~/.config/cosmic/`).
    pub fn open_default() -> Result<Self> {
        let base_dir = CosmicPaths::config_dir()
            .map_err(|e| cosmic_core::CosmicError::io(e.to_string()))?;
        Self::new(base_dir)
    }

    /// Reads a namespace, returning `T::default()` when the file is
    /// missing, empty or corrupted.
    pub fn read_or_default<T>(&self, namespace: Namespace) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.file_path(namespace);
        if !path.exists() {
            return T::default();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(?path, %err, "failed to read namespace, using default");
                return T::default();
            }
        };

        if content.trim().is_empty() {
            return T::default();
        }

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(?path, %err, "corrupted namespace blob, using default");
                T::default()
            }
        }
    }

    /// Fully overwrites a namespace with the serialized `value`.
    pub fn write<T: Serialize>(&self, namespace: Namespace, value: &T) -> Result<()> {
        let path = self.file_path(namespace);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Returns the file path for a namespace.
    fn file_path(&self, namespace: Namespace) -> PathBuf {
        self.base_dir.join(namespace.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_namespace_yields_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();

        let value: Vec<String> = storage.read_or_default(Namespace::Users);
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();

        let names = vec!["Ana".to_string(), "Luis".to_string()];
        storage.write(Namespace::Users, &names).unwrap();

        let loaded: Vec<String> = storage.read_or_default(Namespace::Users);
        assert_eq!(loaded, names);
    }

    #[test]
    fn test_corrupted_namespace_yields_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();

        fs::write(temp_dir.path().join(Namespace::Stats.file_name()), "{not json").unwrap();

        let value: cosmic_core::stats::Stats = storage.read_or_default(Namespace::Stats);
        assert_eq!(value, cosmic_core::stats::Stats::default());
    }

    #[test]
    fn test_write_replaces_whole_blob() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();

        storage
            .write(Namespace::Community, &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        storage.write(Namespace::Community, &vec!["c".to_string()]).unwrap();

        let loaded: Vec<String> = storage.read_or_default(Namespace::Community);
        assert_eq!(loaded, vec!["c".to_string()]);
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(temp_dir.path()).unwrap();

        storage.write(Namespace::Users, &vec!["Ana".to_string()]).unwrap();
        let posts: Vec<String> = storage.read_or_default(Namespace::Community);
        assert!(posts.is_empty());
    }
}
