//! Post repository
//!
//! - create: one constrained insert, unknown author -> NotFound
//! - list: newest first, unbounded
//! - get: single post joined with its author's name

use crate::db::{BlogStore, DbError};
use crate::models::{NewPost, Post, PostContent, PostId, PostTitle, PostWithAuthor, UserId};

/// Post repository
pub struct PostRepo<'a> {
    store: &'a dyn BlogStore,
}

impl<'a> PostRepo<'a> {
    pub fn new(store: &'a dyn BlogStore) -> Self {
        Self { store }
    }

    /// Create a post stamped with the current time.
    ///
    /// Fails with `DbError::NotFound { resource: "user", .. }` when
    /// `author_id` does not reference an existing user.
    pub async fn create(
        &self,
        title: PostTitle,
        content: PostContent,
        author_id: UserId,
    ) -> Result<Post, DbError> {
        let post = self
            .store
            .insert_post(&NewPost::new(title, content, author_id))
            .await?;

        tracing::info!(post_id = post.id, author_id, "Post created");
        Ok(post)
    }

    /// List all posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DbError> {
        self.store.list_posts().await
    }

    /// Get a single post with its author's name.
    pub async fn get(&self, id: PostId) -> Result<PostWithAuthor, DbError> {
        self.store
            .find_post_with_author(id)
            .await?
            .ok_or_else(|| DbError::not_found("post", id))
    }
}
