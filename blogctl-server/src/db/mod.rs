//! Database layer - store handles and repositories
//!
//! # Design Principles
//!
//! - The store handle is created once at startup and passed in, never global
//! - Rely on DB constraints, handle violations - no check-then-insert
//! - Single-row lookups use JOINs for related data - no N+1 queries

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use postgres::PgStore;
pub use repos::{PostRepo, UserRepo};
pub use store::{BlogStore, DbError};
