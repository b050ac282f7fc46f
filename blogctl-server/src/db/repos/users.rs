//! User repository. Users are managed out-of-band (CLI); the post
//! workflow only reads them.

use crate::db::{BlogStore, DbError};
use crate::models::{User, UserId, UserName};

pub struct UserRepo<'a> {
    store: &'a dyn BlogStore,
}

impl<'a> UserRepo<'a> {
    pub fn new(store: &'a dyn BlogStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, name: UserName) -> Result<User, DbError> {
        let user = self.store.insert_user(&name).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        self.store.list_users().await
    }

    pub async fn get(&self, id: UserId) -> Result<User, DbError> {
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| DbError::not_found("user", id))
    }
}
