//! Database Module
//!
//! Handles the SQLite connection pool, migrations, and the write
//! transaction used by checkout.

pub mod models;
pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::utils::AppError;
use repository::RepoResult;

/// Database service owning the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Create a new database service with WAL mode and run migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        if let Some(parent) = std::path::Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::database(format!("Failed to create data dir: {e}")))?;
        }

        // Build connection options: WAL, foreign keys, normal sync.
        // busy_timeout lives on the options so every pooled connection
        // waits out short write locks instead of failing immediately.
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .busy_timeout(Duration::from_secs(5))
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Begin a write transaction that takes SQLite's write lock up front.
    ///
    /// A plain deferred transaction would only lock on the first write,
    /// after checkout has already read stock; an immediate transaction
    /// locks before the read, which is what makes stock validation and
    /// decrement atomic against other writers.
    pub async fn begin_immediate(&self) -> RepoResult<Transaction<'static, Sqlite>> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(tx)
    }
}
