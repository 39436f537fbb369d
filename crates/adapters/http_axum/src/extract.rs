//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body decoded from the raw bytes.
///
/// Unlike [`axum::Json`] this ignores `Content-Type` and reports every decode
/// failure (syntax, missing field, wrong type) as `400 Bad Request`. Reading
/// the body honours the router's size limit, so an oversized payload is
/// rejected before any decoding is attempted.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(ApiError::MalformedBody)
    }
}
