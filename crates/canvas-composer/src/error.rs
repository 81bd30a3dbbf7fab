//! Error types for composer operations.

use canvas_persistence::PersistenceError;
use thiserror::Error;

/// Stylesheet text that the parser could not turn into rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CSS parse error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset into the parsed text.
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the composer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposerError {
    /// Raw CSS from configuration or storage failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading from the storage backend failed.
    #[error("Failed to read stored rules: {0}")]
    Storage(#[from] PersistenceError),

    /// Rules could not be encoded for the style channel.
    #[error("Failed to encode rules for storage")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for composer operations.
pub type Result<T> = std::result::Result<T, ComposerError>;
