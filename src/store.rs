//! Settings store: the single JSON file holding every profile.
//!
//! The store keeps no state beyond the file path. Every `load` re-reads the
//! file and every `save` rewrites it in full through a temp file and rename.
//! There is no locking; concurrent invocations are last-writer-wins.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::model::SettingsDocument;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, returning an empty one if the file doesn't exist
    pub fn load(&self) -> Result<SettingsDocument> {
        if !self.path.exists() {
            debug!("settings file {:?} not found, using empty document", self.path);
            return Ok(SettingsDocument::default());
        }

        let content = fs::read(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(SettingsDocument::default());
        }

        // Bytes go straight to serde so invalid UTF-8 reports as corruption
        let doc: SettingsDocument =
            serde_json::from_slice(&content).map_err(|source| RegistryError::ConfigCorrupted {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "loaded {} profile(s) from {:?} (active: {:?})",
            doc.configs.len(),
            self.path,
            doc.active_config_name
        );
        Ok(doc)
    }

    /// Write the document atomically: temp file in the same directory, then rename
    pub fn save(&self, doc: &SettingsDocument) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| RegistryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut content = serde_json::to_string_pretty(doc)?;
        content.push('\n');

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).map_err(|source| RegistryError::Io {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("saved {} profile(s) to {:?}", doc.configs.len(), self.path);
        Ok(())
    }
}
