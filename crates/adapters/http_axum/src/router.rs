//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use todo_app::ports::TodoStore;

use crate::state::AppState;

/// Largest request body accepted by any route, in bytes (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Build the top-level axum [`Router`].
///
/// Every request passes through a [`RequestBodyLimitLayer`] capped at
/// [`MAX_BODY_BYTES`]; oversized bodies get `413 Payload Too Large` without
/// reaching a handler. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>) -> Router
where
    S: TodoStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
