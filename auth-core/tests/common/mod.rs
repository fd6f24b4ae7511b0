//! Shared setup for auth-core integration tests.

#![allow(dead_code)]

use auth_core::{
    models::RegisterInput,
    services::{AuthService, InMemoryPostStore, InMemoryUserStore, PostService, TokenService},
    utils::ManualClock,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const TEST_ISSUER: &str = "auth-core-test";

pub struct TestApp {
    pub users: Arc<InMemoryUserStore>,
    pub posts: Arc<InMemoryPostStore>,
    pub clock: Arc<ManualClock>,
    pub tokens: TokenService,
    pub auth: AuthService,
    pub post_service: PostService,
}

impl TestApp {
    pub fn new() -> Self {
        let _ = service_core::observability::init_tracing("auth-core-test", "error");

        let users = Arc::new(InMemoryUserStore::new());
        let posts = Arc::new(InMemoryPostStore::new());
        let clock = Arc::new(ManualClock::new(test_epoch()));
        let tokens = TokenService::new(TEST_SECRET, TEST_ISSUER, clock.clone());
        let auth = AuthService::with_tokens(users.clone(), Arc::new(tokens.clone()));
        let post_service = PostService::new(posts.clone());

        Self {
            users,
            posts,
            clock,
            tokens,
            auth,
            post_service,
        }
    }
}

pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn register_input(username: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
    }
}
