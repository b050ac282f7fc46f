//! Store abstraction shared by the Postgres and in-process backends

use async_trait::async_trait;

use crate::models::{NewPost, Post, PostId, PostWithAuthor, User, UserId, UserName};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Data-access handle for users and posts.
///
/// Implementations must make `insert_post` a single atomic step: a missing
/// author is reported as `DbError::NotFound { resource: "user", .. }` by the
/// insert itself, not by a separate lookup beforehand.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    async fn insert_user(&self, name: &UserName) -> Result<User, DbError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DbError>;

    /// All users, ordered by id ascending.
    async fn list_users(&self) -> Result<Vec<User>, DbError>;

    async fn insert_post(&self, post: &NewPost) -> Result<Post, DbError>;

    /// All posts, newest `created_at` first, ties by descending id.
    async fn list_posts(&self) -> Result<Vec<Post>, DbError>;

    async fn find_post_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, DbError>;

    /// Release connections. The handle must not be used afterwards.
    async fn close(&self);
}
