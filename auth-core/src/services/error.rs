use thiserror::Error;

use crate::services::store::StoreError;
use crate::utils::PasswordError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already taken")]
    EmailTaken,

    /// Deliberately does not say whether the email or the password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("No user id in context")]
    NoIdentity,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Signing failed. When raised by registration, `user_id` names the user
    /// that was already persisted.
    #[error("Error generating token")]
    TokenGeneration {
        user_id: Option<String>,
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Error creating user: {0}")]
    Creation(#[source] StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
