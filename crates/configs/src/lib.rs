//! rusty-inbox/crates/configs/src/lib.rs
//!
//! Application configuration. Values come from an optional `config.toml`,
//! `INBOX__`-prefixed environment variables, and the conventional
//! `DATABASE_URL` / `TRIPCODE_SALT` overrides, with a `.env` file honored
//! via dotenvy. The tripcode salt and the storage connection string are the
//! only values the core depends on.

use config::{Config, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Shipping default; real deployments must override it.
const DEFAULT_TRIPCODE_SALT: &str = "default_salt_change_me";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripcodeConfig {
    pub salt: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub tripcode: TripcodeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("tripcode.salt", DEFAULT_TRIPCODE_SALT)?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("INBOX")
                    .prefix_separator("__")
                    .separator("__"),
            );

        // Conventional flat variables win over everything else.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        if let Ok(salt) = std::env::var("TRIPCODE_SALT") {
            builder = builder.set_override("tripcode.salt", salt)?;
        }

        let loaded: AppConfig = builder.build()?.try_deserialize()?;

        if loaded.tripcode.salt.expose_secret() == DEFAULT_TRIPCODE_SALT {
            tracing::warn!("TRIPCODE_SALT is the shipping default; signatures are guessable");
        }

        Ok(loaded)
    }
}
