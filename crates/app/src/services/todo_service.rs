//! Todo service — use-cases for managing todos.

use todo_domain::error::TodoError;
use todo_domain::id::TodoId;
use todo_domain::todo::{NewTodo, Todo, TodoPatch};

use crate::ports::TodoStore;

/// Application service for todo CRUD operations.
pub struct TodoService<S> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a new todo and return its storage-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn create_todo(&self, todo: NewTodo) -> Result<TodoId, TodoError> {
        let id = self.store.create_todo(todo).await?;
        tracing::debug!(%id, "todo created");
        Ok(id)
    }

    /// Look up a todo by id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no todo with `id` exists,
    /// or a storage error from the store.
    pub async fn get_todo(&self, id: TodoId) -> Result<Todo, TodoError> {
        self.store.get_todo(id).await
    }

    /// List all todos.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        self.store.get_todos().await
    }

    /// Replace a todo. Does nothing if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn update_todo(&self, todo: Todo) -> Result<(), TodoError> {
        let id = todo.id;
        self.store.update_todo(todo).await?;
        tracing::debug!(%id, "todo updated");
        Ok(())
    }

    /// Apply a partial update. Does nothing if the id is unknown or the patch
    /// carries no fields; an empty patch never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn patch_todo(&self, patch: TodoPatch) -> Result<(), TodoError> {
        let id = patch.id;
        if patch.is_empty() {
            tracing::debug!(%id, "empty patch skipped");
            return Ok(());
        }
        self.store.patch_todo(patch).await?;
        tracing::debug!(%id, "todo patched");
        Ok(())
    }

    /// Delete a todo by id. Does nothing if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        self.store.delete_todo(id).await?;
        tracing::debug!(%id, "todo deleted");
        Ok(())
    }

    /// Close the underlying store.
    pub async fn close(&self) {
        self.store.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryTodoStore {
        rows: Mutex<BTreeMap<TodoId, Todo>>,
        patches: AtomicUsize,
        closed: AtomicBool,
    }

    impl TodoStore for InMemoryTodoStore {
        fn create_todo(
            &self,
            todo: NewTodo,
        ) -> impl Future<Output = Result<TodoId, TodoError>> + Send {
            let mut rows = self.rows.lock().unwrap();
            let next = rows.keys().next_back().map_or(1, |id| id.get() + 1);
            let id = TodoId::new(next);
            rows.insert(id, todo.with_id(id));
            async move { Ok(id) }
        }

        fn get_todo(&self, id: TodoId) -> impl Future<Output = Result<Todo, TodoError>> + Send {
            let rows = self.rows.lock().unwrap();
            let result: Result<Todo, TodoError> = rows
                .get(&id)
                .cloned()
                .ok_or_else(|| todo_domain::error::NotFoundError { id }.into());
            async move { result }
        }

        fn get_todos(&self) -> impl Future<Output = Result<Vec<Todo>, TodoError>> + Send {
            let rows = self.rows.lock().unwrap();
            let result: Vec<Todo> = rows.values().cloned().collect();
            async move { Ok(result) }
        }

        fn update_todo(&self, todo: Todo) -> impl Future<Output = Result<(), TodoError>> + Send {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.get_mut(&todo.id) {
                *row = todo;
            }
            async { Ok(()) }
        }

        fn patch_todo(
            &self,
            patch: TodoPatch,
        ) -> impl Future<Output = Result<(), TodoError>> + Send {
            self.patches.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.get_mut(&patch.id) {
                patch.apply_to(row);
            }
            async { Ok(()) }
        }

        fn delete_todo(&self, id: TodoId) -> impl Future<Output = Result<(), TodoError>> + Send {
            let mut rows = self.rows.lock().unwrap();
            rows.remove(&id);
            async { Ok(()) }
        }

        fn close(&self) -> impl Future<Output = ()> + Send {
            self.closed.store(true, Ordering::SeqCst);
            async {}
        }
    }

    fn make_service() -> TodoService<InMemoryTodoStore> {
        TodoService::new(InMemoryTodoStore::default())
    }

    #[tokio::test]
    async fn should_return_created_todo_when_fetched_by_id() {
        let svc = make_service();
        let id = svc
            .create_todo(NewTodo::new("buy milk").completed(true))
            .await
            .unwrap();

        let fetched = svc.get_todo(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.description, "buy milk");
        assert!(fetched.is_completed);
    }

    #[tokio::test]
    async fn should_return_not_found_when_todo_missing() {
        let svc = make_service();
        let result = svc.get_todo(TodoId::new(99)).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_nothing_when_store_is_empty() {
        let svc = make_service();
        assert!(svc.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_replace_fields_on_update() {
        let svc = make_service();
        let id = svc.create_todo(NewTodo::new("a")).await.unwrap();

        svc.update_todo(Todo {
            id,
            description: "b".to_string(),
            is_completed: true,
        })
        .await
        .unwrap();

        let fetched = svc.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "b");
        assert!(fetched.is_completed);
    }

    #[tokio::test]
    async fn should_keep_completion_when_patching_description() {
        let svc = make_service();
        let id = svc.create_todo(NewTodo::new("a")).await.unwrap();

        svc.patch_todo(TodoPatch::new(id).description("b"))
            .await
            .unwrap();

        let fetched = svc.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "b");
        assert!(!fetched.is_completed);
    }

    #[tokio::test]
    async fn should_skip_store_when_patch_is_empty() {
        let svc = make_service();
        let id = svc.create_todo(NewTodo::new("a")).await.unwrap();

        svc.patch_todo(TodoPatch::new(id)).await.unwrap();

        assert_eq!(svc.store.patches.load(Ordering::SeqCst), 0);
        assert_eq!(svc.get_todo(id).await.unwrap().description, "a");
    }

    #[tokio::test]
    async fn should_succeed_when_writing_to_missing_id() {
        let svc = make_service();
        let missing = TodoId::new(404);

        svc.update_todo(NewTodo::new("x").with_id(missing))
            .await
            .unwrap();
        svc.patch_todo(TodoPatch::new(missing).is_completed(true))
            .await
            .unwrap();
        svc.delete_todo(missing).await.unwrap();

        assert!(svc.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_delete_todo() {
        let svc = make_service();
        let id = svc.create_todo(NewTodo::new("a")).await.unwrap();

        svc.delete_todo(id).await.unwrap();

        let result = svc.get_todo(id).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_close_underlying_store() {
        let svc = make_service();
        svc.close().await;
        assert!(svc.store.closed.load(Ordering::SeqCst));
    }
}
