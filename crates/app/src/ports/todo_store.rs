//! Todo store port — persistence for todos.

use std::future::Future;

use todo_domain::error::TodoError;
use todo_domain::id::TodoId;
use todo_domain::todo::{NewTodo, Todo, TodoPatch};

/// Capability set every storage engine provides for todos.
///
/// Each call is a single autocommit statement; implementations never retry.
/// Writes addressed to a missing id are silent no-ops.
pub trait TodoStore {
    /// Insert a todo and return the id assigned by storage.
    fn create_todo(&self, todo: NewTodo) -> impl Future<Output = Result<TodoId, TodoError>> + Send;

    /// Fetch a todo by id.
    ///
    /// Resolves to [`TodoError::NotFound`] when no row has this id.
    fn get_todo(&self, id: TodoId) -> impl Future<Output = Result<Todo, TodoError>> + Send;

    /// Fetch every todo, in storage-defined order.
    fn get_todos(&self) -> impl Future<Output = Result<Vec<Todo>, TodoError>> + Send;

    /// Replace description and completion flag of the todo with `todo.id`.
    fn update_todo(&self, todo: Todo) -> impl Future<Output = Result<(), TodoError>> + Send;

    /// Overwrite only the fields present in `patch`.
    fn patch_todo(&self, patch: TodoPatch) -> impl Future<Output = Result<(), TodoError>> + Send;

    /// Remove the todo with `id`.
    fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), TodoError>> + Send;

    /// Release the underlying connections.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
