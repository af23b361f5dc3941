//! HTTP server command
//!
//! Checks the database and bootstraps the schema before serving; if that
//! fails the process exits non-zero without binding the port.

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::{run_server, AppConfig, AppState};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 0.0.0.0:8080)
    #[arg(long, short = 'b', env = "TODOCTL_BIND")]
    pub bind: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Secret used to sign flash cookies
    #[arg(long, env = "TODOCTL_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = AppConfig::resolve(args.database_url, args.secret_key, args.bind)
        .context("Invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let state = AppState::from_config(&config);
    state
        .service()
        .bootstrap()
        .await
        .context("Database connection failed on startup")?;
    tracing::info!("Database connection successful");

    run_server(state, config.bind_addr)
        .await
        .context("Server error")?;

    Ok(())
}
