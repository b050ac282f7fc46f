//! Schema migration command

use anyhow::{Context, Result};
use blogctl_server::db::migrations;
use blogctl_server::{BlogConfig, BlogStore};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &BlogConfig) -> Result<()> {
    let store = super::connect_store(config, args.database_url.as_deref()).await?;

    let result = migrations::run(store.pool())
        .await
        .context("Migration failed");
    store.close().await;
    result?;

    println!("Schema is up to date");
    Ok(())
}
