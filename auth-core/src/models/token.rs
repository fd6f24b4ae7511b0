use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims as carried on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token ID, refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// A verified identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialToken {
    pub id: Option<String>,
    pub subject: String,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CredentialToken {
    pub fn kind(&self) -> TokenKind {
        if self.id.is_some() {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }
}

/// Access and refresh tokens issued together.
///
/// `refresh_token_id` is the `jti` embedded in the refresh token, for callers
/// that track refresh tokens for revocation.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_token_id: String,
    pub token_type: String,
    pub expires_in: i64,
}
