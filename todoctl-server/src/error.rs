//! Error types for todoctl-server
//!
//! Database failures are split by how callers recover from them:
//! a missing table is retried once in the list path, a lost connection
//! or a failed statement is logged and turned into a notification.

use thiserror::Error;

/// SQLSTATE reported by PostgreSQL for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Database error type
#[derive(Error, Debug)]
pub enum DbError {
    /// The database could not be reached
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// The statement referenced a table that does not exist yet
    #[error("table '{table}' does not exist")]
    SchemaMissing { table: &'static str },

    /// Any other statement failure
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Classify an error raised while opening a connection.
    pub fn connect(err: sqlx::Error) -> Self {
        Self::Connection(err)
    }

    /// Classify an error raised while running a statement against `table`.
    pub fn query(table: &'static str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE) => {
                Self::SchemaMissing { table }
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                Self::Connection(err)
            }
            _ => Self::Query(err),
        }
    }

    /// True when bootstrapping the schema may fix the failure.
    pub fn is_schema_missing(&self) -> bool {
        matches!(self, Self::SchemaMissing { .. })
    }
}
