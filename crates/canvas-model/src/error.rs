//! Error types for the rule data model.

use thiserror::Error;

/// Errors raised while building model values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A selector token could not be interpreted.
    #[error("Invalid selector '{token}': {reason}")]
    InvalidSelector { token: String, reason: &'static str },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
