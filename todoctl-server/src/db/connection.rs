//! Connection provider
//!
//! Opens a fresh PostgreSQL connection for every request. There is no
//! pooling, retry or backoff: a failed connect fails the operation.

use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::Query;
use sqlx::{Connection, Postgres};

use crate::error::DbError;

/// Hands out connections for a fixed connection string
#[derive(Clone)]
pub struct ConnectionProvider {
    database_url: String,
}

impl ConnectionProvider {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the database cannot be reached.
    pub async fn connect(&self) -> Result<PgConnection, DbError> {
        PgConnection::connect(&self.database_url)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "error connecting to database");
                DbError::connect(e)
            })
    }
}

/// Close a connection, sending the terminate message to the server.
pub async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "connection did not close cleanly");
    }
}

/// Run a single statement in its own transaction.
///
/// Commits on success and returns the affected row count. On failure the
/// transaction is rolled back before the error is returned.
pub(crate) async fn execute_in_transaction(
    conn: &mut PgConnection,
    table: &'static str,
    query: Query<'_, Postgres, PgArguments>,
) -> Result<u64, DbError> {
    let mut tx = conn.begin().await.map_err(|e| DbError::query(table, e))?;

    match query.execute(&mut *tx).await {
        Ok(done) => {
            tx.commit().await.map_err(|e| DbError::query(table, e))?;
            Ok(done.rows_affected())
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(DbError::query(table, e))
        }
    }
}
