//! Repository Module
//!
//! Module-level functions over the SQLite pool. Functions that must run
//! inside the checkout write transaction take `&mut SqliteConnection`
//! instead of the pool so the caller controls transaction boundaries.

use thiserror::Error;

use crate::utils::AppError;

// Catalog
pub mod inventory;
pub mod product;

// Orders
pub mod order;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store is momentarily locked by another writer. Safe to retry.
    #[error("Store busy: {0}")]
    Busy(String),

    /// A guarded write matched zero rows when a prior read said it must
    /// match one. Indicates lost write exclusion, never user error.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// SQLite result codes that signal transient lock contention:
/// SQLITE_BUSY, SQLITE_LOCKED, SQLITE_BUSY_RECOVERY, SQLITE_BUSY_SNAPSHOT
const BUSY_CODES: [&str; 4] = ["5", "6", "261", "517"];

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let busy = db_err
                    .code()
                    .map(|code| BUSY_CODES.contains(&code.as_ref()))
                    .unwrap_or(false)
                    || db_err.message().contains("database is locked");
                if busy {
                    RepoError::Busy(db_err.message().to_string())
                } else {
                    RepoError::Database(db_err.message().to_string())
                }
            }
            sqlx::Error::PoolTimedOut => {
                RepoError::Busy("timed out waiting for a pooled connection".to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Busy(msg) => AppError::busy(msg),
            RepoError::InvariantViolation(msg) => AppError::internal(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
