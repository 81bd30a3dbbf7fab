//! JSON file storage backend.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use canvas_model::StoredPayload;

use super::merge_payload;
use crate::error::{PersistenceError, Result};
use crate::manager::{StorageConfig, StorageManager};

/// Stores the payload as a JSON document on disk.
///
/// A missing file reads as an empty payload.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    config: StorageConfig,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: StorageConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the payload from disk.
    pub fn read(&self) -> Result<StoredPayload> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No style file at {}, starting empty", self.path.display());
                return Ok(StoredPayload::default());
            }
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Deserialization {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the payload to disk, replacing the whole file.
    ///
    /// Written atomically: temp file, sync, rename.
    pub fn save(&self, payload: &StoredPayload) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(payload)
            .map_err(|e| PersistenceError::Serialization { source: e })?;

        let temp_path = self.path.with_extension("json.tmp");

        // Create parent directory if needed
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(&bytes).map_err(|e| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: self.path.clone(),
            source: e,
        })?;

        tracing::info!("Saved canvas styles to {}", self.path.display());
        Ok(())
    }
}

impl StorageManager for FileStorage {
    fn config(&self) -> StorageConfig {
        self.config
    }

    fn store(&mut self, payload: &StoredPayload) {
        let mut merged = match self.read() {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable style file before store");
                StoredPayload::default()
            }
        };
        merge_payload(&mut merged, payload);

        if let Err(e) = self.save(&merged) {
            tracing::error!(
                error = %e,
                suggestion = ?e.suggestion(),
                "{}",
                e.user_message()
            );
        }
    }

    fn load_cached(&self) -> Result<StoredPayload> {
        self.read()
    }
}
