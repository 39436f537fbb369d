//! # todod — todo daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`todo.toml`, env vars)
//! - Initialise `tracing` from the configured filter
//! - Connect the configured store (`PostgreSQL` or `SQLite`), which creates
//!   the `todos` table if needed
//! - Construct the application service, injecting the store via the port trait
//! - Build the axum router and serve it on the configured address
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the store
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_adapter_http_axum::router;
use todo_adapter_http_axum::state::AppState;
use todo_adapter_storage_sqlx::{PgTodoStore, SqliteTodoStore};
use todo_app::ports::TodoStore;
use todo_app::services::todo_service::TodoService;

use crate::config::{Config, Driver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.database.driver {
        Driver::Postgres => {
            tracing::info!(options = ?config.database.postgres, "connecting to postgres");
            let store = PgTodoStore::connect(&config.database.postgres)
                .await
                .context("connecting to postgres database")?;
            serve(store, &config).await
        }
        Driver::Sqlite => {
            tracing::info!(url = %config.database.sqlite_url, "opening sqlite database");
            let store = SqliteTodoStore::connect(&config.database.sqlite_url)
                .await
                .context("opening sqlite database")?;
            serve(store, &config).await
        }
    }
}

/// Serve the API on top of `store` until a shutdown signal, then close it.
async fn serve<S>(store: S, config: &Config) -> anyhow::Result<()>
where
    S: TodoStore + Send + Sync + 'static,
{
    let service = Arc::new(TodoService::new(store));
    let app = router::build(AppState::from_arc(Arc::clone(&service)));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!("todod listening on http://{bind_addr}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    service.close().await;
    tracing::info!("store closed");

    served.context("serving http")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
