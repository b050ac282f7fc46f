//! Schema setup for users and posts

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL CHECK (length(btrim(title)) > 0),
        content TEXT NOT NULL CHECK (length(btrim(content)) > 0),
        author_id BIGINT NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS posts_created_at_idx ON posts (created_at DESC, id DESC)",
    "CREATE INDEX IF NOT EXISTS posts_author_id_idx ON posts (author_id)",
];

/// Create tables and indexes if they are missing. Safe to run repeatedly.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running blog migrations...");

    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(statements = STATEMENTS.len(), "Migrations complete");
    Ok(())
}
