//! Schema bootstrap command

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::config::resolve_database_url;
use todoctl_server::{PgStore, TodoService};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create the `todos` table if needed, then exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url).context("Invalid configuration")?;

    TodoService::new(Arc::new(PgStore::new(database_url)))
        .bootstrap()
        .await
        .context("Failed to bootstrap the database schema")?;

    println!("Database schema is ready");
    Ok(())
}
