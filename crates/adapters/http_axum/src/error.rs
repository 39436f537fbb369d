//! HTTP error response mapping.

use std::num::ParseIntError;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use todo_domain::error::TodoError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with, mapped to a status code.
pub enum ApiError {
    /// Error returned by the todo service.
    Todo(TodoError),
    /// The request body could not be read (too large, connection dropped).
    Body(BytesRejection),
    /// The request body is not the expected JSON document.
    MalformedBody(serde_json::Error),
    /// A path segment is not an integer id.
    InvalidId(ParseIntError),
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        Self::Todo(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(err: BytesRejection) -> Self {
        Self::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Todo(TodoError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Todo(TodoError::Storage(err)) => {
                tracing::error!(error = %err, source = ?err.source(), "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Body(rejection) => return rejection.into_response(),
            Self::MalformedBody(err) => (
                StatusCode::BAD_REQUEST,
                format!("malformed request body: {err}"),
            ),
            Self::InvalidId(err) => (StatusCode::BAD_REQUEST, format!("invalid todo id: {err}")),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
