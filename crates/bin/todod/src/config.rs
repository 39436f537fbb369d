//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `todo.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;

use serde::Deserialize;
use todo_adapter_storage_sqlx::PostgresOptions;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Which storage engine backs the todo store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Postgres,
    Sqlite,
}

impl FromStr for Driver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::Validation(format!(
                "unknown database driver {other:?}",
            ))),
        }
    }
}

/// Database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Storage engine to connect to.
    pub driver: Driver,
    /// `SQLite` connection URL, used when `driver = "sqlite"`.
    pub sqlite_url: String,
    /// `PostgreSQL` connection options, used when `driver = "postgres"`.
    pub postgres: PostgresOptions,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `todo.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("todo.toml")?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("TODO_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("TODO_PORT") {
            self.server.port = parse_port("TODO_PORT", &val)?;
        }
        if let Some(val) = var("TODO_BIND") {
            let (host, port) = val.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("TODO_BIND must be host:port, got {val:?}"))
            })?;
            self.server.port = parse_port("TODO_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(val) = var("TODO_DATABASE_DRIVER") {
            self.database.driver = val.parse()?;
        }
        if let Some(val) = var("TODO_SQLITE_URL") {
            self.database.sqlite_url = val;
        }

        let pg = &mut self.database.postgres;
        if let Some(val) = var("TODO_PG_HOST") {
            pg.host = val;
        }
        if let Some(val) = var("TODO_PG_PORT") {
            pg.port = parse_port("TODO_PG_PORT", &val)?;
        }
        if let Some(val) = var("TODO_PG_USER") {
            pg.user = val;
        }
        if let Some(val) = var("TODO_PG_PASSWORD") {
            pg.password = val;
        }
        if let Some(val) = var("TODO_PG_DBNAME") {
            pg.dbname = val;
        }
        if let Some(val) = var("TODO_PG_SSLMODE") {
            pg.ssl_mode = val;
        }

        if let Some(val) = var("TODO_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.database.driver == Driver::Sqlite && self.database.sqlite_url.is_empty() {
            return Err(ConfigError::Validation(
                "sqlite_url must be set when driver is sqlite".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_port(name: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{name} is not a valid port: {value:?}")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: Driver::default(),
            sqlite_url: "sqlite:todo.db?mode=rwc".to_string(),
            postgres: PostgresOptions::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "todod=info,todo_app=info,todo_adapter_http_axum=info,\
                     todo_adapter_storage_sqlx=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
