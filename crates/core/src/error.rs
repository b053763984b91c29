//! Error types for docqa.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! answer engine, document source and serialization failures.

use thiserror::Error;

/// Unified error type for docqa.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// "No answer found" is not an error; it is a regular answering outcome.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Answer engine errors (request, transport, malformed response)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Document source and text extraction errors
    #[error("Source error: {0}")]
    Source(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
