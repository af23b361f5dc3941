//! Todo operations
//!
//! Each operation opens one session, runs one statement and closes the
//! session on every path. Database failures never escape: list degrades
//! to an empty result, add and delete turn them into notices.

use std::sync::Arc;

use crate::db::{TodoSession, TodoStore};
use crate::error::DbError;
use crate::flash::Notice;
use crate::models::{TaskText, Todo};

/// Operations behind the three pages
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Open a connection and create the schema. Used at startup, where a
    /// failure should stop the process.
    pub async fn bootstrap(&self) -> Result<(), DbError> {
        let mut session = self.store.open().await?;
        let result = session.bootstrap().await;
        session.close().await;
        result
    }

    /// All todos, newest first. Never fails; errors yield an empty list.
    pub async fn list(&self) -> Vec<Todo> {
        let mut session = match self.store.open().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "cannot list todos");
                return Vec::new();
            }
        };

        let todos = list_with_bootstrap(&mut *session).await;
        session.close().await;
        todos
    }

    /// Validate and insert a task.
    pub async fn add(&self, raw_task: Option<&str>) -> Notice {
        let task = match TaskText::parse(raw_task) {
            Ok(task) => task,
            Err(e) => {
                tracing::debug!(error = %e, "rejected empty task");
                return Notice::error("Task cannot be empty!");
            }
        };

        let mut session = match self.store.open().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "database error adding task");
                return Notice::error("Error adding task.");
            }
        };

        let result = session.insert(&task).await;
        session.close().await;

        match result {
            Ok(()) => {
                tracing::info!(task = %task.as_str(), "task added");
                Notice::success("Task added successfully!")
            }
            Err(e) => {
                tracing::error!(error = %e, "database error adding task");
                Notice::error("Error adding task.")
            }
        }
    }

    /// Delete a task by id.
    pub async fn delete(&self, id: i64) -> Notice {
        let mut session = match self.store.open().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, id, "database error deleting task");
                return Notice::error("Error deleting task.");
            }
        };

        let result = session.delete(id).await;
        session.close().await;

        match result {
            Ok(0) => Notice::warning(format!("Task with ID {} not found.", id)),
            Ok(_) => {
                tracing::info!(id, "task deleted");
                Notice::success("Task deleted successfully!")
            }
            Err(e) => {
                tracing::error!(error = %e, id, "database error deleting task");
                Notice::error("Error deleting task.")
            }
        }
    }

    /// True if a connection can be opened.
    pub async fn ping(&self) -> bool {
        match self.store.open().await {
            Ok(session) => {
                session.close().await;
                true
            }
            Err(_) => false,
        }
    }
}

/// Select the todos; if the table is missing, bootstrap and retry once.
async fn list_with_bootstrap(session: &mut dyn TodoSession) -> Vec<Todo> {
    match session.list().await {
        Ok(todos) => return todos,
        Err(e) if e.is_schema_missing() => {
            tracing::warn!("table 'todos' not found, attempting to create it");
        }
        Err(e) => {
            tracing::error!(error = %e, "database error listing todos");
            return Vec::new();
        }
    }

    if let Err(e) = session.bootstrap().await {
        tracing::error!(error = %e, "failed to create table");
        return Vec::new();
    }

    match session.list().await {
        Ok(todos) => todos,
        Err(e) => {
            tracing::error!(error = %e, "failed to list todos after creating table");
            Vec::new()
        }
    }
}
