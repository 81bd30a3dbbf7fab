//! Persistence error types.
//!
//! Storage operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be encoded.
    #[error("Failed to serialize stored rules")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored file is not a valid payload document.
    #[error("Failed to deserialize stored rules from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A storage backend refused the operation.
    #[error("Storage backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the canvas styles.".to_string()
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "The style file at {} could not be read. It may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::Unavailable { reason } => {
                format!("The style storage is not available: {reason}")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Delete or restore the style file from a backup.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::Unavailable { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_write_suggestions_differ() {
        let read = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("styles.json"),
            source: std::io::Error::other("denied"),
        };
        let write = PersistenceError::Io {
            operation: "write",
            path: PathBuf::from("styles.json"),
            source: std::io::Error::other("denied"),
        };
        assert_ne!(read.suggestion(), write.suggestion());
        assert_eq!(read.user_message(), "Could not read the file at styles.json");
    }
}
