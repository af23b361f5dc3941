//! In-memory store for tests
//!
//! Mirrors the PostgreSQL store closely enough to exercise the service
//! and the routes: the table can be absent until bootstrapped, and
//! connection or statement failures can be switched on.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::DateTime;

use super::{TodoSession, TodoStore, TODOS_TABLE};
use crate::error::DbError;
use crate::models::{TaskText, Todo};

#[derive(Default)]
struct MemoryState {
    table: Option<Vec<Todo>>,
    next_id: i32,
    clock: i64,
    fail_connect: bool,
    fail_queries: bool,
    fail_bootstrap: bool,
    opened: usize,
    closed: usize,
    bootstraps: usize,
    statements: usize,
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Store with an empty `todos` table.
    pub fn new() -> Self {
        let store = Self::without_table();
        store.lock().table = Some(Vec::new());
        store
    }

    /// Store where the `todos` table has not been created yet.
    pub fn without_table() -> Self {
        Self::default()
    }

    pub fn fail_connect(&self, on: bool) {
        self.lock().fail_connect = on;
    }

    pub fn fail_queries(&self, on: bool) {
        self.lock().fail_queries = on;
    }

    pub fn fail_bootstrap(&self, on: bool) {
        self.lock().fail_bootstrap = on;
    }

    pub fn has_table(&self) -> bool {
        self.lock().table.is_some()
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> Vec<Todo> {
        self.lock().table.clone().unwrap_or_default()
    }

    pub fn opened(&self) -> usize {
        self.lock().opened
    }

    pub fn closed(&self) -> usize {
        self.lock().closed
    }

    pub fn bootstraps(&self) -> usize {
        self.lock().bootstraps
    }

    /// Statements that reached the store, bootstrap excluded.
    pub fn statements(&self) -> usize {
        self.lock().statements
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn open(&self) -> Result<Box<dyn TodoSession>, DbError> {
        let mut state = self.lock();
        if state.fail_connect {
            return Err(DbError::connect(sqlx::Error::PoolTimedOut));
        }
        state.opened += 1;
        Ok(Box::new(MemorySession {
            store: self.clone(),
        }))
    }
}

struct MemorySession {
    store: MemoryStore,
}

impl MemorySession {
    /// Run `f` against the table, failing like PostgreSQL would.
    fn with_table<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> Result<T, DbError> {
        let mut state = self.store.lock();
        state.statements += 1;
        if state.fail_queries {
            return Err(DbError::query(
                TODOS_TABLE,
                sqlx::Error::Protocol("injected failure".into()),
            ));
        }
        if state.table.is_none() {
            return Err(DbError::SchemaMissing { table: TODOS_TABLE });
        }
        Ok(f(&mut state))
    }
}

#[async_trait]
impl TodoSession for MemorySession {
    async fn list(&mut self) -> Result<Vec<Todo>, DbError> {
        self.with_table(|state| {
            let mut rows = state.table.clone().unwrap_or_default();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            rows
        })
    }

    async fn insert(&mut self, task: &TaskText) -> Result<(), DbError> {
        self.with_table(|state| {
            state.next_id += 1;
            state.clock += 1;
            let todo = Todo {
                id: state.next_id,
                task: task.as_str().to_owned(),
                created_at: DateTime::from_timestamp(1_700_000_000 + state.clock, 0),
            };
            if let Some(table) = state.table.as_mut() {
                table.push(todo);
            }
        })
    }

    async fn delete(&mut self, id: i64) -> Result<u64, DbError> {
        self.with_table(|state| {
            let table = state.table.get_or_insert_with(Vec::new);
            let before = table.len();
            table.retain(|t| i64::from(t.id) != id);
            (before - table.len()) as u64
        })
    }

    async fn bootstrap(&mut self) -> Result<(), DbError> {
        let mut state = self.store.lock();
        state.bootstraps += 1;
        if state.fail_bootstrap {
            return Err(DbError::query(
                TODOS_TABLE,
                sqlx::Error::Protocol("injected bootstrap failure".into()),
            ));
        }
        state.table.get_or_insert_with(Vec::new);
        Ok(())
    }

    async fn close(self: Box<Self>) {
        self.store.lock().closed += 1;
    }
}
