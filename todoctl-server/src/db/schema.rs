//! Schema bootstrap for the `todos` table

use sqlx::postgres::PgConnection;

use super::connection::execute_in_transaction;
use crate::error::DbError;

pub const TODOS_TABLE: &str = "todos";

const CREATE_TODOS: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        task TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the `todos` table if it does not already exist.
///
/// Safe to run repeatedly.
pub async fn bootstrap(conn: &mut PgConnection) -> Result<(), DbError> {
    execute_in_transaction(conn, TODOS_TABLE, sqlx::query(CREATE_TODOS)).await?;
    tracing::info!("checked/created '{}' table", TODOS_TABLE);
    Ok(())
}
