//! PostgreSQL store backed by a sqlx pool

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::pool::create_pool;
use super::{BlogStore, DbError};
use crate::models::{
    NewPost, Post, PostAuthor, PostId, PostWithAuthor, User, UserId, UserName,
};

/// Postgres-backed store. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a new pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = create_pool(database_url, max_connections).await?;
        tracing::debug!(max_connections, "Postgres pool connected");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn insert_user(&self, name: &UserName) -> Result<User, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, created_at FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Single constrained insert: the `author_id` foreign key rejects
    /// unknown authors, so there is no window between check and write.
    async fn insert_post(&self, post: &NewPost) -> Result<Post, DbError> {
        let result = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, title, content, author_id, created_at, updated_at
            "#,
        )
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .bind(post.author_id)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DbError::not_found("user", post.author_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, author_id, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_post_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.author_id,
                p.created_at,
                p.updated_at,
                u.name AS author_name
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| PostWithAuthor {
            post: Post {
                id: r.get("id"),
                title: r.get("title"),
                content: r.get("content"),
                author_id: r.get("author_id"),
                created_at: r.get("created_at"),
                updated_at: r.get("updated_at"),
            },
            author: PostAuthor {
                name: r.get("author_name"),
            },
        }))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Postgres pool closed");
    }
}
