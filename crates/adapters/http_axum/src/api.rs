//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod todos;

use axum::Router;
use axum::routing::get;

use todo_app::ports::TodoStore;

use crate::state::AppState;

/// Build the todo routes.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: TodoStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/todo",
            get(todos::list::<S>)
                .post(todos::create::<S>)
                .put(todos::update::<S>)
                .patch(todos::patch::<S>),
        )
        .route(
            "/todo/{id}",
            get(todos::get::<S>).delete(todos::delete::<S>),
        )
}
