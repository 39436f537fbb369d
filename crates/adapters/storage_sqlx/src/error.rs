//! Storage-specific error type wrapping sqlx errors.

use todo_domain::error::TodoError;

/// Errors originating from the SQL storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for TodoError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
