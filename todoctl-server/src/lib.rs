//! todoctl-server: a small todo list served as HTML
//!
//! Lists, adds and deletes todos stored in PostgreSQL. Every request
//! opens its own connection, runs one statement and renders or redirects.

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod models;
pub mod render;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use db::{PgStore, TodoSession, TodoStore};
pub use error::DbError;
pub use server::{build_router, run_server};
pub use service::TodoService;
pub use state::AppState;
