//! # todo-adapter-storage-sqlx
//!
//! SQL persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`TodoStore`](todo_app::ports::TodoStore) port for
//!   `PostgreSQL` ([`PgTodoStore`]) and `SQLite` ([`SqliteTodoStore`])
//! - Own the connection pool lifecycle: connect on construction, release on
//!   `close`
//! - Create the `todos` table when it does not exist yet
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `todo-app` (for the port trait) and `todo-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod postgres;
pub mod sqlite;

pub use postgres::{Options as PostgresOptions, PgTodoStore};
pub use sqlite::SqliteTodoStore;
