//! API server for the task tracker
//!
//! Serves the task REST API over a SQLite (or in-memory) store.

mod config;
mod middleware;
mod routes;
mod state;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tasks_core::task::seed_if_empty;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasks_api=info,tasks_core=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let repo = state::open_repository(&config).context("failed to open task store")?;
    if config.seed {
        seed_if_empty(repo.as_ref())
            .await
            .context("failed to seed task store")?;
    }

    let app = routes::app(AppState::new(repo, config.api_key.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("REST API listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
