//! Seeds a demo inbox with a couple of replies through the real service.
//! Development convenience only.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use configs::AppConfig;
use services::{InboxService, TripcodeGenerator};
use storage_adapters::PgInboxRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(config.database.url.expose_secret())
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let repository = Arc::new(PgInboxRepository::new(pool));
    let tripcodes = TripcodeGenerator::new(config.tripcode.salt.expose_secret());
    let service = InboxService::new(repository, tripcodes);

    let (id, signature) = service
        .create_inbox(
            "Demo feedback".to_string(),
            "demo",
            "demo-secret",
            Utc::now() + Duration::days(30),
            true,
        )
        .await?;

    service
        .reply_to_inbox(id, "An anonymous hello.".to_string(), None, None)
        .await?;
    service
        .reply_to_inbox(
            id,
            "A signed hello.".to_string(),
            Some("visitor"),
            Some("visitor-secret"),
        )
        .await?;

    println!("seeded inbox {id} owned by {signature}");
    Ok(())
}
