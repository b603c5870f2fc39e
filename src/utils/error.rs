//! Error Handling
//!
//! Unified error type for the pipeline boundary.
//! Collaborator failures never surface here; they degrade inside the
//! pipeline. Only configuration problems and explicit cancellation do.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors (invalid request, invalid config file, bad provider setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The caller cancelled an in-flight generation
    #[error("Generation cancelled")]
    Cancelled,
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error rejects the request outright (as opposed to cancellation)
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Io(_) | AppError::Serialization(_))
    }
}
