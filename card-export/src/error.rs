//! Export error types.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting a card.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The card could not be turned into SVG or a bitmap.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Writing the exported file failed.
    #[error("Failed to save {path}: {source}")]
    Save {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The upload endpoint URL is invalid.
    #[error("Invalid upload URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP layer failed (connection, status, body).
    #[error("Upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upload service answered with something unusable.
    #[error("Unexpected upload response: {0}")]
    UnexpectedResponse(String),

    /// The QR symbol could not be encoded.
    #[error("QR encoding failed: {0}")]
    Qr(String),
}
