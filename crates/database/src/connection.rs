//! Database connection management

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::fs;
use tracing::info;
use natter_config::DatabaseConfig;

use crate::migrations::run_migrations;
use crate::store::{Backend, DocumentStore, MongoStore, SqliteStore};
use crate::types::{DatabaseError, DatabaseResult};

/// Open the document store named by `config.url`.
///
/// SQLite stores are migrated before they are handed out; MongoDB stores are
/// pinged so an unreachable deployment fails here rather than on first use.
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<DocumentStore> {
    match Backend::from_url(&config.url) {
        Some(Backend::Sqlite) => {
            let pool = prepare_database(config)
                .await
                .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

            run_migrations(&pool)
                .await
                .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

            Ok(DocumentStore::Sqlite(SqliteStore::new(pool)))
        }
        Some(Backend::MongoDb) => Ok(DocumentStore::Mongo(MongoStore::connect(config).await?)),
        None => Err(DatabaseError::ConnectionError(format!(
            "unsupported database url scheme: {}",
            redact(&config.url)
        ))),
    }
}

/// Open a store that must already exist, without creating or migrating it.
///
/// Used by the connectivity diagnostic so a mistyped SQLite path fails instead
/// of leaving an empty database behind.
pub async fn open_existing(config: &DatabaseConfig) -> DatabaseResult<DocumentStore> {
    match Backend::from_url(&config.url) {
        Some(Backend::Sqlite) => {
            let options = SqliteConnectOptions::from_str(&config.url)
                .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
                .create_if_missing(false)
                .busy_timeout(Duration::from_secs(5));

            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
                .connect_with(options)
                .await
                .map_err(|e| {
                    DatabaseError::ConnectionError(format!(
                        "failed to open database {}: {e}",
                        redact(&config.url)
                    ))
                })?;

            Ok(DocumentStore::Sqlite(SqliteStore::new(pool)))
        }
        _ => connect(config).await,
    }
}

/// Prepare and establish a SQLite connection pool
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let in_memory = is_in_memory(&config.url);

    let mut options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid sqlite url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // Every connection to `:memory:` opens a fresh database, so keep exactly one alive.
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    if is_in_memory(url) {
        return Ok(());
    }

    let Some(sqlite_path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let sqlite_path = sqlite_path.split('?').next().unwrap_or_default();
    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}

/// Strip credentials from a connection string before it is logged or echoed.
pub fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    match rest.split_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}
