//! In-memory stores for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{Post, User};
use crate::services::store::{PostStore, StoreError, StoreResult, UniqueField, UserStore};

/// User store keyed by id. Enforces username and email uniqueness on `create`,
/// the same way a database unique index would.
pub struct InMemoryUserStore {
    pub users: Mutex<HashMap<String, User>>,
    create_calls: AtomicUsize,
    fail_creates: AtomicBool,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            create_calls: AtomicUsize::new(0),
            fail_creates: AtomicBool::new(false),
        }
    }

    /// Number of times `create` has been called, successful or not.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent `create` fail with a backend error.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, User>>> {
        self.users
            .lock()
            .map_err(|e| StoreError::Backend(anyhow::anyhow!("User store mutex poisoned: {}", e)))
    }

    fn find_by<F>(&self, key: &str, predicate: F) -> StoreResult<User>
    where
        F: Fn(&User) -> bool,
    {
        self.lock()?
            .values()
            .find(|user| predicate(user))
            .cloned()
            .ok_or_else(|| StoreError::not_found("User", key))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> StoreResult<User> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(anyhow::anyhow!("Simulated create failure")));
        }

        let mut users = self.lock()?;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(UniqueField::Username));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(UniqueField::Email));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<User> {
        self.find_by(username, |u| u.username == username)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        self.find_by(email, |u| u.email == email)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<User> {
        self.lock()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("User", id))
    }
}

pub struct InMemoryPostStore {
    pub posts: Mutex<Vec<Post>>,
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Vec<Post>>> {
        self.posts
            .lock()
            .map_err(|e| StoreError::Backend(anyhow::anyhow!("Post store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn all(&self) -> StoreResult<Vec<Post>> {
        Ok(self.lock()?.clone())
    }

    async fn create(&self, post: Post) -> StoreResult<Post> {
        self.lock()?.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Post> {
        self.lock()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Post", id))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut posts = self.lock()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(StoreError::not_found("Post", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PasswordHashString;

    fn user(username: &str, email: &str) -> User {
        User::new(
            username.to_string(),
            email.to_string(),
            PasswordHashString::new("hash"),
        )
    }

    #[tokio::test]
    async fn test_user_store_lookup_and_not_found() {
        let store = InMemoryUserStore::new();
        let created = store.create(user("john", "john@mail.com")).await.unwrap();

        assert_eq!(store.find_by_username("john").await.unwrap().id, created.id);
        assert_eq!(store.find_by_email("john@mail.com").await.unwrap().id, created.id);
        assert_eq!(store.find_by_id(&created.id).await.unwrap().username, "john");

        let err = store.find_by_username("JOHN").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_user_store_enforces_unique_constraints() {
        let store = InMemoryUserStore::new();
        store.create(user("john", "john@mail.com")).await.unwrap();

        let err = store.create(user("john", "other@mail.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Username)));

        let err = store.create(user("jane", "john@mail.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(UniqueField::Email)));

        assert_eq!(store.create_calls(), 3);
    }

    #[tokio::test]
    async fn test_post_store_delete_missing_is_not_found() {
        let store = InMemoryPostStore::new();
        let post = store
            .create(Post::new("hello".to_string(), "owner".to_string(), None))
            .await
            .unwrap();

        store.delete(&post.id).await.unwrap();
        assert!(store.delete(&post.id).await.unwrap_err().is_not_found());
        assert!(store.all().await.unwrap().is_empty());
    }
}
