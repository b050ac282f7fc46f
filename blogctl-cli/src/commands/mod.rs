//! Subcommand implementations

pub mod migrate;
pub mod serve;
pub mod users;

use anyhow::{Context, Result};
use blogctl_server::{BlogConfig, PgStore};

/// Resolve the database URL (flag, then config/env) and connect.
pub async fn connect_store(config: &BlogConfig, url_override: Option<&str>) -> Result<PgStore> {
    let database_url = url_override
        .map(str::to_owned)
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, or [database] url in the config file")?;

    PgStore::connect(&database_url, config.database.max_connections)
        .await
        .context("Failed to create database pool")
}
