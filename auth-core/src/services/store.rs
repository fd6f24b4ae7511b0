//! Storage collaborators.
//!
//! Persistence lives behind these traits. Implementations must report a
//! missing record as [`StoreError::NotFound`] and a unique-constraint
//! violation as [`StoreError::Conflict`], never as a generic backend error.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::models::{Post, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Username => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Unique constraint violated on {0}")]
    Conflict(UniqueField),

    #[error("Storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: User) -> StoreResult<User>;
    async fn find_by_username(&self, username: &str) -> StoreResult<User>;
    async fn find_by_email(&self, email: &str) -> StoreResult<User>;
    async fn find_by_id(&self, id: &str) -> StoreResult<User>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn all(&self) -> StoreResult<Vec<Post>>;
    async fn create(&self, post: Post) -> StoreResult<Post>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Post>;
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
