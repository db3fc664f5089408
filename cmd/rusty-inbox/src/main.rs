//! # Rusty-Inbox Binary
//!
//! The entry point that assembles the application: configuration, logging,
//! Postgres pool and migrations, then the axum router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use api_adapters::AppState;
use configs::AppConfig;
use services::{InboxService, TripcodeGenerator};
use storage_adapters::PgInboxRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    // 1. Storage
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(config.database.url.expose_secret())
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    let repository = Arc::new(PgInboxRepository::new(pool));

    // 2. Application service
    let tripcodes = TripcodeGenerator::new(config.tripcode.salt.expose_secret());
    let service = Arc::new(InboxService::new(repository, tripcodes));

    // 3. Router, mounted under the versioned prefix
    let app = Router::new().nest("/api/v1", api_adapters::router(AppState { service }));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "rusty-inbox listening");

    axum::serve(listener, app).await?;
    Ok(())
}
