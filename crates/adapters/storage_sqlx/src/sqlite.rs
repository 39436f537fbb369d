//! `SQLite` implementation of [`TodoStore`].

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};

use todo_app::ports::TodoStore;
use todo_domain::error::{NotFoundError, TodoError};
use todo_domain::id::TodoId;
use todo_domain::todo::{NewTodo, Todo, TodoPatch};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Todo`].
struct Wrapper(Todo);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let description: String = row.try_get("description")?;
        let is_completed: bool = row.try_get("is_completed")?;

        Ok(Self(Todo {
            id: TodoId::new(id),
            description,
            is_completed,
        }))
    }
}

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS todos (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        description VARCHAR(256) NOT NULL,
        isCompleted BOOLEAN NOT NULL
    )
";

// Tables created by older deployments allow NULL in both value columns.
const SELECT_BY_ID: &str = r"
    SELECT id,
           COALESCE(description, '') AS description,
           COALESCE(isCompleted, FALSE) AS is_completed
    FROM todos WHERE id = ?
";
const SELECT_ALL: &str = r"
    SELECT id,
           COALESCE(description, '') AS description,
           COALESCE(isCompleted, FALSE) AS is_completed
    FROM todos
";

const INSERT: &str = "INSERT INTO todos (description, isCompleted) VALUES (?, ?) RETURNING id";
const UPDATE: &str = "UPDATE todos SET description = ?, isCompleted = ? WHERE id = ?";

const PATCH: &str = r"
    UPDATE todos SET
        description = COALESCE(?, description),
        isCompleted = COALESCE(?, isCompleted)
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = ?";

/// `SQLite`-backed todo store.
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Open `database_url` (e.g. `sqlite:todo.db?mode=rwc` or
    /// `sqlite::memory:`), creating the file and the `todos` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the database cannot be
    /// opened, or the table cannot be created.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        Self::with_pool(pool).await
    }

    /// Use an existing pool, creating the `todos` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the table cannot be created.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TodoStore for SqliteTodoStore {
    async fn create_todo(&self, todo: NewTodo) -> Result<TodoId, TodoError> {
        let id: i64 = sqlx::query_scalar(INSERT)
            .bind(&todo.description)
            .bind(todo.is_completed)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(TodoId::new(id))
    }

    async fn get_todo(&self, id: TodoId) -> Result<Todo, TodoError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        row.map(|w| w.0).ok_or_else(|| NotFoundError { id }.into())
    }

    async fn get_todos(&self) -> Result<Vec<Todo>, TodoError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update_todo(&self, todo: Todo) -> Result<(), TodoError> {
        sqlx::query(UPDATE)
            .bind(&todo.description)
            .bind(todo.is_completed)
            .bind(todo.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn patch_todo(&self, patch: TodoPatch) -> Result<(), TodoError> {
        sqlx::query(PATCH)
            .bind(patch.description)
            .bind(patch.is_completed)
            .bind(patch.id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_domain::todo::DESCRIPTION_MAX_LEN;

    async fn setup() -> SqliteTodoStore {
        SqliteTodoStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn should_create_todos_table_on_connect() {
        let store = setup().await;

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(store.pool())
                .await
                .unwrap();

        assert!(tables.iter().any(|row| row.0 == "todos"), "missing todos table");
    }

    #[tokio::test]
    async fn should_keep_rows_when_table_is_ensured_again() {
        let store = setup().await;
        let id = store.create_todo(NewTodo::new("keep me")).await.unwrap();

        let store = SqliteTodoStore::with_pool(store.pool().clone())
            .await
            .unwrap();

        assert_eq!(store.get_todo(id).await.unwrap().description, "keep me");
    }

    #[tokio::test]
    async fn should_create_and_retrieve_todo() {
        let store = setup().await;

        let id = store
            .create_todo(NewTodo::new("water plants").completed(true))
            .await
            .unwrap();

        let fetched = store.get_todo(id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.description, "water plants");
        assert!(fetched.is_completed);
    }

    #[tokio::test]
    async fn should_assign_distinct_ids() {
        let store = setup().await;
        let first = store.create_todo(NewTodo::new("a")).await.unwrap();
        let second = store.create_todo(NewTodo::new("b")).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn should_return_not_found_when_todo_never_created() {
        let store = setup().await;
        let result = store.get_todo(TodoId::new(12345)).await;
        assert!(matches!(result, Err(TodoError::NotFound(NotFoundError { id })) if id.get() == 12345));
    }

    #[tokio::test]
    async fn should_return_empty_list_when_table_is_empty() {
        let store = setup().await;
        let all = store.get_todos().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn should_list_all_todos_with_ids() {
        let store = setup().await;
        let a = store.create_todo(NewTodo::new("a")).await.unwrap();
        let b = store.create_todo(NewTodo::new("b")).await.unwrap();

        let mut ids: Vec<TodoId> = store
            .get_todos()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn should_replace_fields_on_update() {
        let store = setup().await;
        let id = store.create_todo(NewTodo::new("a")).await.unwrap();

        store
            .update_todo(Todo {
                id,
                description: "b".to_string(),
                is_completed: true,
            })
            .await
            .unwrap();

        let fetched = store.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "b");
        assert!(fetched.is_completed);
    }

    #[tokio::test]
    async fn should_keep_completion_when_patch_only_sets_description() {
        let store = setup().await;
        let id = store.create_todo(NewTodo::new("a")).await.unwrap();

        store
            .patch_todo(TodoPatch::new(id).description("b"))
            .await
            .unwrap();

        let fetched = store.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "b");
        assert!(!fetched.is_completed);
    }

    #[tokio::test]
    async fn should_keep_description_when_patch_only_sets_completion() {
        let store = setup().await;
        let id = store.create_todo(NewTodo::new("a")).await.unwrap();

        store
            .patch_todo(TodoPatch::new(id).is_completed(true))
            .await
            .unwrap();

        let fetched = store.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "a");
        assert!(fetched.is_completed);
    }

    #[tokio::test]
    async fn should_succeed_without_changes_when_id_does_not_exist() {
        let store = setup().await;
        let existing = store.create_todo(NewTodo::new("a")).await.unwrap();
        let missing = TodoId::new(existing.get() + 100);

        store
            .update_todo(NewTodo::new("b").with_id(missing))
            .await
            .unwrap();
        store
            .patch_todo(TodoPatch::new(missing).description("c"))
            .await
            .unwrap();
        store.delete_todo(missing).await.unwrap();

        let all = store.get_todos().await.unwrap();
        assert_eq!(all, vec![NewTodo::new("a").with_id(existing)]);
    }

    #[tokio::test]
    async fn should_delete_todo_when_exists() {
        let store = setup().await;
        let id = store.create_todo(NewTodo::new("a")).await.unwrap();

        store.delete_todo(id).await.unwrap();

        let result = store.get_todo(id).await;
        assert!(matches!(result, Err(TodoError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_storage_error_after_close() {
        let store = setup().await;
        store.close().await;

        let result = store.get_todos().await;
        assert!(matches!(result, Err(TodoError::Storage(_))));
    }

    #[tokio::test]
    async fn should_work_on_table_created_with_legacy_schema() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE todos (id INTEGER PRIMARY KEY, description varchar(256), isCompleted BOOLEAN)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO todos (description, isCompleted) VALUES (NULL, NULL)")
            .execute(&pool)
            .await
            .unwrap();

        let store = SqliteTodoStore::with_pool(pool).await.unwrap();

        let id = store.create_todo(NewTodo::new("a")).await.unwrap();
        store
            .update_todo(Todo {
                id,
                description: "b".to_string(),
                is_completed: false,
            })
            .await
            .unwrap();
        store
            .patch_todo(TodoPatch::new(id).is_completed(true))
            .await
            .unwrap();

        let fetched = store.get_todo(id).await.unwrap();
        assert_eq!(fetched.description, "b");
        assert!(fetched.is_completed);

        let all = store.get_todos().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(
            all.iter()
                .any(|todo| todo.description.is_empty() && !todo.is_completed)
        );
    }

    #[tokio::test]
    async fn should_store_description_filling_the_column() {
        let store = setup().await;
        let description = "x".repeat(DESCRIPTION_MAX_LEN);

        let id = store
            .create_todo(NewTodo::new(description.clone()))
            .await
            .unwrap();

        assert_eq!(store.get_todo(id).await.unwrap().description, description);
    }
}
