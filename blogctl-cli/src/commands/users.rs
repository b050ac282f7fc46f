//! Author management. Posts can only reference users created here.

use anyhow::{Context, Result};
use blogctl_server::db::UserRepo;
use blogctl_server::models::UserName;
use blogctl_server::{BlogConfig, BlogStore};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Add an author
    Add {
        /// Display name
        name: String,
    },
    /// List authors
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A validated users subcommand
enum Action {
    Add(UserName),
    List { json: bool },
}

impl TryFrom<UsersCommand> for Action {
    type Error = anyhow::Error;

    fn try_from(command: UsersCommand) -> Result<Self> {
        Ok(match command {
            UsersCommand::Add { name } => Self::Add(UserName::new(&name)?),
            UsersCommand::List { json } => Self::List { json },
        })
    }
}

pub async fn run_users(args: UsersArgs, config: &BlogConfig) -> Result<()> {
    // Validate before connecting so bad input fails fast.
    let action = Action::try_from(args.command)?;

    let store = super::connect_store(config, args.database_url.as_deref()).await?;
    let result = execute(&store, action).await;
    store.close().await;
    result
}

async fn execute(store: &dyn BlogStore, action: Action) -> Result<()> {
    let repo = UserRepo::new(store);

    match action {
        Action::Add(name) => {
            let user = repo.create(name).await.context("Failed to add user")?;
            println!("{}\t{}", user.id, user.name);
        }
        Action::List { json } => {
            let users = repo.list().await.context("Failed to list users")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                for user in users {
                    println!("{}\t{}", user.id, user.name);
                }
            }
        }
    }

    Ok(())
}
