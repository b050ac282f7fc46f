//! blogctl-server: a small blog over HTTP
//!
//! - `/api/posts` JSON endpoint (create, list, fetch one)
//! - Server-rendered pages: home, post detail, admin create form
//! - Postgres storage through sqlx, or an in-process store for tests/demos

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod pages;

pub use config::{BlogConfig, ConfigError};
pub use db::{BlogStore, DbError, MemoryStore, PgStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
