//! Error types for the settings store and profile registry.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// The settings file exists but is not a valid settings document.
    #[error(
        "Settings file '{}' is corrupted: {source}\nHint: fix the file by hand or move it away and try again.",
        .path.display()
    )]
    ConfigCorrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Profile '{0}' not found.\nHint: Use 'ccm list' to see available profiles.")]
    ProfileNotFound(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
