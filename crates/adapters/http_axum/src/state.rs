//! Shared application state for axum handlers.

use std::sync::Arc;

use todo_app::ports::TodoStore;
use todo_app::services::todo_service::TodoService;

/// Application state shared across all axum handlers.
///
/// Generic over the store type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<S> {
    /// Todo CRUD service.
    pub todo_service: Arc<TodoService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            todo_service: Arc::clone(&self.todo_service),
        }
    }
}

impl<S> AppState<S>
where
    S: TodoStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(todo_service: TodoService<S>) -> Self {
        Self {
            todo_service: Arc::new(todo_service),
        }
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    ///
    /// Use this when the caller keeps its own handle, e.g. to close the store
    /// once the server has stopped.
    pub fn from_arc(todo_service: Arc<TodoService<S>>) -> Self {
        Self { todo_service }
    }
}
