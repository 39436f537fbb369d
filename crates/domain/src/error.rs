//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`TodoError`]
//! at the port boundary, so callers only ever branch on two kinds: the row
//! was missing, or storage failed.

use crate::id::TodoId;

/// Base error returned by every todo port and service.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// The requested todo does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed (connection, constraint, decoding, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// No row matched the requested id.
#[derive(Debug, thiserror::Error)]
#[error("todo {id} not found")]
pub struct NotFoundError {
    pub id: TodoId,
}
