use std::sync::Arc;
use validator::Validate;

use crate::{
    models::{AuthResponse, LoginInput, RegisterInput, User},
    services::{
        store::{StoreError, UniqueField, UserStore},
        AuthTokenService, ServiceError, ServiceResult,
    },
    utils::{hash_password, validation::first_error_message, verify_password, Password},
};

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Option<Arc<dyn AuthTokenService>>,
}

impl AuthService {
    /// An auth service that returns an empty access token.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            tokens: None,
        }
    }

    pub fn with_tokens(users: Arc<dyn UserStore>, tokens: Arc<dyn AuthTokenService>) -> Self {
        Self {
            users,
            tokens: Some(tokens),
        }
    }

    pub async fn register(&self, input: RegisterInput) -> ServiceResult<AuthResponse> {
        let input = input.sanitized();
        input
            .validate()
            .map_err(|e| ServiceError::Validation(first_error_message(&e, &RegisterInput::FIELD_ORDER)))?;

        // Fast-path checks for a precise error; the store's unique constraint
        // is what actually guarantees uniqueness.
        match self.users.find_by_username(&input.username).await {
            Err(e) if e.is_not_found() => {}
            _ => return Err(ServiceError::UsernameTaken),
        }

        match self.users.find_by_email(&input.email).await {
            Err(e) if e.is_not_found() => {}
            _ => return Err(ServiceError::EmailTaken),
        }

        let password_hash = hash_password(&Password::new(input.password))?;
        let user = User::new(input.username, input.email, password_hash);

        let user = self.users.create(user).await.map_err(|e| match e {
            StoreError::Conflict(UniqueField::Username) => ServiceError::UsernameTaken,
            StoreError::Conflict(UniqueField::Email) => ServiceError::EmailTaken,
            other => ServiceError::Creation(other),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        let access_token = self.access_token_for(&user)?;
        Ok(AuthResponse { access_token, user })
    }

    pub async fn login(&self, input: LoginInput) -> ServiceResult<AuthResponse> {
        let input = input.sanitized();
        input
            .validate()
            .map_err(|e| ServiceError::Validation(first_error_message(&e, &LoginInput::FIELD_ORDER)))?;

        let user = match self.users.find_by_email(&input.email).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                tracing::warn!("Login failed: invalid credentials");
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => return Err(ServiceError::Storage(e)),
        };

        if !verify_password(&Password::new(input.password), &user.password_hash) {
            tracing::warn!("Login failed: invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");

        let access_token = self.access_token_for(&user)?;
        Ok(AuthResponse { access_token, user })
    }

    fn access_token_for(&self, user: &User) -> ServiceResult<String> {
        let Some(tokens) = &self.tokens else {
            return Ok(String::new());
        };

        tokens.issue_access_token(user).map_err(|e| match e {
            ServiceError::TokenGeneration { source, .. } => {
                tracing::error!(user_id = %user.id, error = %source, "Failed to sign access token");
                ServiceError::TokenGeneration {
                    user_id: Some(user.id.clone()),
                    source,
                }
            }
            other => other,
        })
    }
}
