//! PostgreSQL-backed todo store
//!
//! Each session wraps one connection from [`ConnectionProvider`].
//! Writes run in an explicit transaction so a failed statement is
//! rolled back before the connection is closed.

use async_trait::async_trait;
use sqlx::postgres::PgConnection;

use super::connection::{execute_in_transaction, release, ConnectionProvider};
use super::schema::{self, TODOS_TABLE};
use super::{TodoSession, TodoStore};
use crate::error::DbError;
use crate::models::{TaskText, Todo};

/// Todo store backed by PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    provider: ConnectionProvider,
}

impl PgStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            provider: ConnectionProvider::new(database_url),
        }
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn open(&self) -> Result<Box<dyn TodoSession>, DbError> {
        let conn = self.provider.connect().await?;
        Ok(Box::new(PgSession { conn }))
    }
}

/// One live PostgreSQL connection
pub struct PgSession {
    conn: PgConnection,
}

#[async_trait]
impl TodoSession for PgSession {
    async fn list(&mut self) -> Result<Vec<Todo>, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, task, created_at
            FROM todos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| DbError::query(TODOS_TABLE, e))
    }

    async fn insert(&mut self, task: &TaskText) -> Result<(), DbError> {
        let query = sqlx::query("INSERT INTO todos (task) VALUES ($1)").bind(task.as_str());
        execute_in_transaction(&mut self.conn, TODOS_TABLE, query).await?;
        Ok(())
    }

    async fn delete(&mut self, id: i64) -> Result<u64, DbError> {
        let query = sqlx::query("DELETE FROM todos WHERE id = $1").bind(id);
        execute_in_transaction(&mut self.conn, TODOS_TABLE, query).await
    }

    async fn bootstrap(&mut self) -> Result<(), DbError> {
        schema::bootstrap(&mut self.conn).await
    }

    async fn close(self: Box<Self>) {
        release(self.conn).await;
    }
}
