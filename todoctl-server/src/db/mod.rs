//! Database layer - per-request connections and the todo store
//!
//! # Design Principles
//!
//! - One connection per request, opened by the handler and always closed
//!   before the response is produced - no pool, no shared connection
//! - One statement per operation, committed or rolled back explicitly
//! - Schema bootstrap is idempotent and can run at any time

pub mod connection;
#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::{TaskText, Todo};

pub use connection::ConnectionProvider;
pub use postgres::{PgSession, PgStore};
pub use schema::TODOS_TABLE;

/// Opens sessions against the todo storage.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Open a new session. Each session owns one live connection.
    async fn open(&self) -> Result<Box<dyn TodoSession>, DbError>;
}

/// One open connection. Callers must `close` it on every exit path.
#[async_trait]
pub trait TodoSession: Send {
    /// All todos, newest first.
    async fn list(&mut self) -> Result<Vec<Todo>, DbError>;

    /// Insert a todo; id and timestamp are assigned by the database.
    async fn insert(&mut self, task: &TaskText) -> Result<(), DbError>;

    /// Delete by id, returning the number of rows removed.
    async fn delete(&mut self, id: i64) -> Result<u64, DbError>;

    /// Create the `todos` table if it does not exist.
    async fn bootstrap(&mut self) -> Result<(), DbError>;

    /// Release the connection.
    async fn close(self: Box<Self>);
}
