//! Common error types for Radar Bench

use thiserror::Error;

/// Common result type for storage and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the persistence and configuration layers.
///
/// Validation problems are not errors: they travel as
/// [`crate::validate::ValidationIssue`] values so the UI can warn without
/// blocking edits. Mutations against unknown ids are silent no-ops and never
/// surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
