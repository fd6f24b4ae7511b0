use chrono::{DateTime, Duration, Utc};
use http::{header, HeaderMap, Request};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::models::{Claims, CredentialToken, TokenPair, User};
use crate::services::{ServiceError, ServiceResult};
use crate::utils::{Clock, SystemClock};

pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

const SIGNATURE_ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies identity tokens.
pub trait AuthTokenService: Send + Sync {
    fn issue_access_token(&self, user: &User) -> ServiceResult<String>;
    fn issue_refresh_token(&self, user: &User, token_id: &str) -> ServiceResult<String>;
    fn parse_token(&self, token: &str) -> ServiceResult<CredentialToken>;

    /// Accepts both `Bearer <token>` and a bare token.
    fn parse_token_from_headers(&self, headers: &HeaderMap) -> ServiceResult<CredentialToken> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .ok_or(ServiceError::InvalidToken)?;

        let token = strip_bearer(value).unwrap_or(value).trim();
        if token.is_empty() {
            return Err(ServiceError::InvalidToken);
        }

        self.parse_token(token)
    }

    /// Parse the credential carried in a request's `Authorization` header.
    fn parse_token_from_request<B>(&self, request: &Request<B>) -> ServiceResult<CredentialToken>
    where
        Self: Sized,
    {
        self.parse_token_from_headers(request.headers())
    }
}

/// Issues and verifies HS256 identity tokens.
///
/// Expiry is checked against the injected [`Clock`], not the library's own
/// wall clock, so tests can move time without sleeping.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            clock,
        }
    }

    /// Build a token service on the system clock from configuration.
    pub fn from_config(config: &JwtConfig) -> Result<Self, anyhow::Error> {
        let secret = config.secret.expose_secret();
        if secret.is_empty() {
            return Err(anyhow::anyhow!("JWT secret must not be empty"));
        }

        tracing::info!(issuer = %config.issuer, "JWT service initialized with HS256 secret");

        Ok(Self::new(
            secret.as_bytes(),
            config.issuer.clone(),
            Arc::new(SystemClock),
        ))
    }

    /// Generate both access and refresh tokens, with a fresh refresh token id
    pub fn issue_token_pair(&self, user: &User) -> ServiceResult<TokenPair> {
        let access_token = self.issue_access_token(user)?;
        let refresh_token_id = Uuid::new_v4().to_string();
        let refresh_token = self.issue_refresh_token(user, &refresh_token_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_token_id,
            token_type: "Bearer".to_string(),
            expires_in: access_token_ttl().num_seconds(),
        })
    }

    fn claims_for(&self, user: &User, ttl: Duration, jti: Option<String>) -> Claims {
        let now = self.clock.now();
        Claims {
            sub: user.id.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti,
        }
    }

    fn sign(&self, claims: &Claims) -> ServiceResult<String> {
        encode(&Header::new(SIGNATURE_ALGORITHM), claims, &self.encoding_key).map_err(|source| {
            ServiceError::TokenGeneration {
                user_id: None,
                source,
            }
        })
    }
}

impl AuthTokenService for TokenService {
    /// Generate an access token for a user
    fn issue_access_token(&self, user: &User) -> ServiceResult<String> {
        self.sign(&self.claims_for(user, access_token_ttl(), None))
    }

    /// Generate a refresh token carrying the caller's token id
    fn issue_refresh_token(&self, user: &User, token_id: &str) -> ServiceResult<String> {
        self.sign(&self.claims_for(user, refresh_token_ttl(), Some(token_id.to_string())))
    }

    /// Verify signature, issuer and expiry, and decode the claims.
    ///
    /// A token is valid up to and including its `exp` second.
    fn parse_token(&self, token: &str) -> ServiceResult<CredentialToken> {
        let mut validation = Validation::new(SIGNATURE_ALGORITHM);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected token");
                ServiceError::InvalidToken
            })?
            .claims;

        if self.clock.now().timestamp() > claims.exp {
            tracing::debug!(sub = %claims.sub, "Rejected expired token");
            return Err(ServiceError::InvalidToken);
        }

        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;

        Ok(CredentialToken {
            id: claims.jti,
            subject: claims.sub,
            issuer: claims.iss,
            issued_at,
            expires_at,
        })
    }
}

/// Token service double that can be switched to fail signing.
pub struct MockTokenService {
    inner: TokenService,
    fail_signing: AtomicBool,
}

impl MockTokenService {
    pub fn new(inner: TokenService) -> Self {
        Self {
            inner,
            fail_signing: AtomicBool::new(false),
        }
    }

    pub fn fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    fn check_signing(&self) -> ServiceResult<()> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(ServiceError::TokenGeneration {
                user_id: None,
                source: ErrorKind::InvalidKeyFormat.into(),
            });
        }
        Ok(())
    }
}

impl AuthTokenService for MockTokenService {
    fn issue_access_token(&self, user: &User) -> ServiceResult<String> {
        self.check_signing()?;
        self.inner.issue_access_token(user)
    }

    fn issue_refresh_token(&self, user: &User, token_id: &str) -> ServiceResult<String> {
        self.check_signing()?;
        self.inner.issue_refresh_token(user, token_id)
    }

    fn parse_token(&self, token: &str) -> ServiceResult<CredentialToken> {
        self.inner.parse_token(token)
    }
}

pub fn access_token_ttl() -> Duration {
    Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES)
}

pub fn refresh_token_ttl() -> Duration {
    Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)
}

fn strip_bearer(value: &str) -> Option<&str> {
    let (scheme, rest) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(rest)
}

fn timestamp(secs: i64) -> ServiceResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(ServiceError::InvalidToken)
}
