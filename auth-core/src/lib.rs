//! auth-core: identity and authorization core.
//!
//! Registers accounts, authenticates credentials, issues and verifies signed
//! session tokens, and enforces per-resource ownership. Storage and transport
//! are collaborators behind the traits in [`services::store`] and the `http`
//! request types.

pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use middleware::{authenticate, identity_from, with_identity, RequestContext};
pub use services::{
    AuthService, AuthTokenService, PostService, ServiceError, ServiceResult, TokenService, UserService,
};
