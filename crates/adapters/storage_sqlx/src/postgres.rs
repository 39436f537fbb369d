//! `PostgreSQL` implementation of [`TodoStore`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::{FromRow, PgPool, Row};

use todo_app::ports::TodoStore;
use todo_domain::error::{NotFoundError, TodoError};
use todo_domain::id::TodoId;
use todo_domain::todo::{NewTodo, Todo, TodoPatch};

use crate::error::StorageError;

/// Connection parameters for a `PostgreSQL` server.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Options {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// libpq-style SSL mode: `disable`, `allow`, `prefer`, `require`,
    /// `verify-ca` or `verify-full`.
    pub ssl_mode: String,
    pub max_connections: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "todo".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: 10,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Options {
    /// Translate into sqlx connect options.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if `ssl_mode` is not a known mode.
    pub fn connect_options(&self) -> Result<PgConnectOptions, StorageError> {
        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(ssl_mode))
    }
}

/// Wrapper for converting database rows into domain [`Todo`].
struct Wrapper(Todo);

impl<'r> FromRow<'r, PgRow> for Wrapper {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
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
        id          BIGSERIAL PRIMARY KEY,
        description VARCHAR(256) NOT NULL,
        isCompleted BOOLEAN NOT NULL
    )
";

// Tables created by older deployments use a 32-bit `SERIAL` id and allow NULL
// in both value columns.
const SELECT_BY_ID: &str = r"
    SELECT id::BIGINT AS id,
           COALESCE(description, '') AS description,
           COALESCE(isCompleted, FALSE) AS is_completed
    FROM todos WHERE id = $1
";
const SELECT_ALL: &str = r"
    SELECT id::BIGINT AS id,
           COALESCE(description, '') AS description,
           COALESCE(isCompleted, FALSE) AS is_completed
    FROM todos
";

const INSERT: &str =
    "INSERT INTO todos (description, isCompleted) VALUES ($1, $2) RETURNING id::BIGINT";
const UPDATE: &str = "UPDATE todos SET description = $1, isCompleted = $2 WHERE id = $3";

const PATCH: &str = r"
    UPDATE todos SET
        description = COALESCE($1, description),
        isCompleted = COALESCE($2, isCompleted)
    WHERE id = $3
";

const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = $1";

/// `PostgreSQL`-backed todo store.
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    /// Connect with `options` and create the `todos` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the options are invalid, the server is
    /// unreachable, or the table cannot be created.
    pub async fn connect(options: &Options) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options.connect_options()?)
            .await?;

        Self::with_pool(pool).await
    }

    /// Use an existing pool, creating the `todos` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the table cannot be created.
    pub async fn with_pool(pool: PgPool) -> Result<Self, StorageError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PgTodoStore {
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
