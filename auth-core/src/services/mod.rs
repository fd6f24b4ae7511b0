//! Services layer: authentication, tokens, ownership and the resource services
//! that depend on them.

mod auth;
pub mod error;
mod jwt;
pub mod memory;
pub mod ownership;
mod post;
pub mod store;
mod user;

pub use auth::AuthService;
pub use error::{ServiceError, ServiceResult};
pub use jwt::{
    access_token_ttl, refresh_token_ttl, AuthTokenService, MockTokenService, TokenService,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use memory::{InMemoryPostStore, InMemoryUserStore};
pub use ownership::{authorize_mutation, can_mutate, Ownable};
pub use post::PostService;
pub use store::{PostStore, StoreError, StoreResult, UniqueField, UserStore};
pub use user::UserService;
