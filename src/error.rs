//! Error types for the vitt-mukti core

use thiserror::Error;

/// Result type alias for core and collaborator operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {

    // =============================
    // Core Errors
    // =============================

    /// The only error the calculator raises: an input outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // =============================
    // Collaborator Errors
    // =============================

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidParameter(message.into())
    }
}
