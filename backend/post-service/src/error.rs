//! Error types for the post service.

use media_store::MediaStoreError;
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity absent, or a required non-empty result set was empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Media upload failed; all underlying causes collapse into one kind
    #[error(transparent)]
    MediaStore(#[from] MediaStoreError),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(err.to_string())
    }
}
