//! HTTP server command
//!
//! Runs the blog (API + pages) until Ctrl+C/SIGTERM, then closes the store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use blogctl_server::db::{migrations, UserRepo};
use blogctl_server::models::UserName;
use blogctl_server::{run_server, BlogConfig, BlogStore, MemoryStore};
use clap::Parser;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030, or from config)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Keep data in process memory instead of Postgres (lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub in_memory: bool,

    /// Create an author at startup (repeatable, --in-memory only)
    #[arg(long = "seed-user", value_name = "NAME", requires = "in_memory")]
    pub seed_users: Vec<String>,

    /// Do not create missing tables on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: BlogConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.cors_permissive {
        config.server.cors_permissive = true;
    }

    let store = open_store(&args, &config).await?;

    tracing::info!("Starting blogctl server on {}", config.server.bind);
    let result = run_server(store.clone(), config.server_config())
        .await
        .context("Server error");

    store.close().await;
    result
}

async fn open_store(args: &ServeArgs, config: &BlogConfig) -> Result<Arc<dyn BlogStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store - data is lost on exit");
        let store = MemoryStore::new();
        let repo = UserRepo::new(&store);
        for name in &args.seed_users {
            let user = repo.create(UserName::new(name)?).await?;
            tracing::info!(user_id = user.id, name = %user.name, "Seeded user");
        }
        return Ok(Arc::new(store));
    }

    let store = super::connect_store(config, args.database_url.as_deref()).await?;
    if !args.skip_migrations {
        migrations::run(store.pool())
            .await
            .context("Failed to run migrations")?;
    }
    Ok(Arc::new(store))
}
