//! In-process store with the same semantics as the Postgres backend.
//!
//! Used by tests and by `serve --in-memory`. Data lives only as long as the
//! process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BlogStore, DbError};
use crate::models::{
    NewPost, Post, PostAuthor, PostId, PostWithAuthor, User, UserId, UserName,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, Post>,
    next_user_id: UserId,
    next_post_id: PostId,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            posts: BTreeMap::new(),
            next_user_id: 1,
            next_post_id: 1,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user under a fixed id, replacing any existing one.
    pub async fn seed_user(&self, id: UserId, name: &UserName) -> User {
        let mut tables = self.inner.write().await;
        let user = User {
            id,
            name: name.as_str().to_owned(),
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        tables.next_user_id = tables.next_user_id.max(id + 1);
        user
    }

    pub async fn post_count(&self) -> usize {
        self.inner.read().await.posts.len()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn insert_user(&self, name: &UserName) -> Result<User, DbError> {
        let mut tables = self.inner.write().await;
        let id = tables.next_user_id;
        tables.next_user_id += 1;

        let user = User {
            id,
            name: name.as_str().to_owned(),
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, DbError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    // Author check and insert share one write guard.
    async fn insert_post(&self, post: &NewPost) -> Result<Post, DbError> {
        let mut tables = self.inner.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(DbError::not_found("user", post.author_id));
        }

        let id = tables.next_post_id;
        tables.next_post_id += 1;

        let row = Post {
            id,
            title: post.title.as_str().to_owned(),
            content: post.content.as_str().to_owned(),
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        tables.posts.insert(id, row.clone());
        Ok(row)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DbError> {
        let tables = self.inner.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn find_post_with_author(&self, id: PostId) -> Result<Option<PostWithAuthor>, DbError> {
        let tables = self.inner.read().await;
        let Some(post) = tables.posts.get(&id) else {
            return Ok(None);
        };

        // Rows cannot outlive their author here; a dangling id means corruption.
        let author = tables.users.get(&post.author_id).ok_or_else(|| {
            DbError::not_found("user", post.author_id)
        })?;

        Ok(Some(PostWithAuthor {
            post: post.clone(),
            author: PostAuthor {
                name: author.name.clone(),
            },
        }))
    }

    async fn close(&self) {
        tracing::debug!("In-memory store closed");
    }
}
