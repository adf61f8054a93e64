//! Unified path management for Cosmic data files.
//!
//! All persisted blobs and the secrets file live under one application
//! directory, resolved per-platform via the `dirs` crate.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cosmic/            # Config directory
//! ├── db_v1.json               # User directory
//! ├── community_v1.json        # Community posts
//! ├── chat_history_v1.json     # email -> conversations mapping
//! ├── stats_v1.json            # Visit/interaction counters
//! └── secret.json              # API keys
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Cosmic.
pub struct CosmicPaths;

impl CosmicPaths {
    /// Returns the Cosmic configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/cosmic/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("cosmic"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
