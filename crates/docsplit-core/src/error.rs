//! Error types for docsplit.

use thiserror::Error;

/// Result type alias using DocsplitError.
pub type Result<T> = std::result::Result<T, DocsplitError>;

/// Errors that can occur while loading and chunking documents.
#[derive(Error, Debug)]
pub enum DocsplitError {
    /// Invalid chunking or service configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Document does not exist in the source.
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    /// Document exists but could not be read.
    #[error("Failed to fetch {id}: {reason}")]
    FetchFailed { id: String, reason: String },

    /// The acquisition step did not populate the source.
    #[error("Failed to acquire {id}: {reason}")]
    AcquisitionFailed { id: String, reason: String },

    /// Chunking produced an unusable result.
    #[error("Processing error: {message}")]
    Processing { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (unexpected).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DocsplitError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a fetch error for the given document.
    pub fn fetch_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an acquisition error for the given document.
    pub fn acquisition_failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AcquisitionFailed {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a processing error.
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error came from retrieving the document rather than
    /// from configuration or processing.
    pub fn is_acquisition(&self) -> bool {
        matches!(
            self,
            Self::DocumentNotFound { .. } | Self::FetchFailed { .. } | Self::AcquisitionFailed { .. }
        )
    }

    /// Get a stable error code for responses and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CONFIG_ERROR",
            Self::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::AcquisitionFailed { .. } => "ACQUISITION_FAILED",
            Self::Processing { .. } => "PROCESSING_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
