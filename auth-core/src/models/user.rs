//! User model and the transient registration/login inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::PasswordHashString;

/// A registered account.
///
/// The password hash stays in memory for verification and is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: PasswordHashString,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id.
    pub fn new(username: String, email: String, password_hash: PasswordHashString) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, message = "username must be at least 2 characters long"))]
    pub username: String,

    #[validate(email(message = "email is not valid"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters long"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "confirm password must match the password"))]
    pub confirm_password: String,
}

impl RegisterInput {
    pub const FIELD_ORDER: [&'static str; 4] = ["username", "email", "password", "confirm_password"];

    pub fn sanitize(&mut self) {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.trim().to_string();
        self.confirm_password = self.confirm_password.trim().to_string();
    }

    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "email is not valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginInput {
    pub const FIELD_ORDER: [&'static str; 2] = ["email", "password"];

    pub fn sanitize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.trim().to_string();
    }

    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

/// Result of a successful registration or login.
///
/// `access_token` is empty when the auth service runs without a token service.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_register() -> RegisterInput {
        RegisterInput {
            username: "  john  ".to_string(),
            email: " JOHNDOE@mail.com ".to_string(),
            password: " 123456 ".to_string(),
            confirm_password: " 123456 ".to_string(),
        }
    }

    #[test]
    fn test_register_input_sanitize() {
        let input = sample_register().sanitized();

        assert_eq!(input.username, "john");
        assert_eq!(input.email, "johndoe@mail.com");
        assert_eq!(input.password, "123456");
        assert_eq!(input.confirm_password, "123456");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sample_register().sanitized();
        let twice = once.clone().sanitized();
        assert_eq!(once, twice);

        let login = LoginInput {
            email: "\tMiXeD@Example.COM ".to_string(),
            password: "  secret ".to_string(),
        };
        let once = login.sanitized();
        assert_eq!(once.clone().sanitized(), once);
    }

    #[test]
    fn test_register_input_validation_rules() {
        let valid = sample_register().sanitized();

        let short_username = RegisterInput { username: "j".to_string(), ..valid.clone() };
        assert!(short_username.validate().is_err());

        let bad_email = RegisterInput { email: "johndoe".to_string(), ..valid.clone() };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterInput {
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let mismatch = RegisterInput { confirm_password: "654321".to_string(), ..valid };
        assert!(mismatch.validate().is_err());
    }

    #[test]
    fn test_login_input_requires_password() {
        let input = LoginInput {
            email: "john@mail.com".to_string(),
            password: "   ".to_string(),
        }
        .sanitized();

        assert!(input.validate().is_err());
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new(
            "john".to_string(),
            "john@mail.com".to_string(),
            PasswordHashString::new("$argon2id$secret"),
        );

        let json = serde_json::to_value(&user).expect("serialize user");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "john");
        assert_eq!(json["id"], user.id.as_str());
    }
}
