//! blogctl CLI - run and administer a small blog
//!
//! - `serve`: HTTP API and server-rendered pages
//! - `migrate`: create the database schema
//! - `users`: manage post authors

use std::path::PathBuf;

use anyhow::{Context, Result};
use blogctl_server::BlogConfig;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "blogctl",
    author,
    version,
    about = "Run and administer a small Postgres-backed blog"
)]
struct Cli {
    /// Config file (default: ~/.blogctl/config.toml if present)
    #[arg(long, global = true, env = "BLOGCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (API + pages)
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Manage post authors (add, list)
    Users(commands::users::UsersArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let config =
        BlogConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, config).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args, &config).await,
        Commands::Users(args) => commands::users::run_users(args, &config).await,
    }
}
