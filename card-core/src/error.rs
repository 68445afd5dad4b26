//! Error types for card editing operations.

use thiserror::Error;

/// Result type for card operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur while editing a card.
#[derive(Debug, Error)]
pub enum CardError {
    /// Element not found on the card surface.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The element kind does not support the requested operation.
    #[error("Unsupported operation on element {id}: {operation}")]
    Unsupported {
        /// Element the operation targeted.
        id: String,
        /// Operation that was refused.
        operation: &'static str,
    },

    /// No in-place text edit is in progress.
    #[error("No text edit in progress")]
    NoActiveEdit,

    /// A data URI could not be parsed or does not carry an image.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Surface or snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
