//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::AppConfig;
use crate::db::{PgStore, TodoStore};
use crate::flash;
use crate::service::TodoService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: TodoService,
    cookie_key: Key,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, secret_key: &str) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service: TodoService::new(store),
                cookie_key: flash::signing_key(secret_key),
            }),
        }
    }

    /// State backed by PostgreSQL as described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(PgStore::new(config.database_url.clone())),
            &config.secret_key,
        )
    }

    pub fn service(&self) -> &TodoService {
        &self.inner.service
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.inner.cookie_key.clone()
    }
}
