//! Request-scoped identity propagation.
//!
//! A [`RequestContext`] is an immutable bag of typed request values. Deriving a
//! context with an identity returns a new value, so concurrent requests never
//! observe each other's identity.

use http::{Extensions, Request};

use crate::services::{ServiceError, ServiceResult};

/// Typed slot for the authenticated user id.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CurrentUserId(String);

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    values: Extensions,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `user_id`. `self` is left untouched.
    pub fn with_identity(&self, user_id: impl Into<String>) -> Self {
        let mut values = self.values.clone();
        values.insert(CurrentUserId(user_id.into()));
        Self { values }
    }

    /// The authenticated user id, or [`ServiceError::NoIdentity`].
    ///
    /// A missing identity only means the caller is anonymous; whether that is
    /// acceptable is up to the operation.
    pub fn identity(&self) -> ServiceResult<&str> {
        self.values
            .get::<CurrentUserId>()
            .map(|id| id.0.as_str())
            .ok_or(ServiceError::NoIdentity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.values.get::<CurrentUserId>().is_some()
    }

    /// The context attached to `request` by the auth middleware, or an empty one.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        request
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default()
    }
}

/// Derive a context carrying `user_id`.
pub fn with_identity(ctx: &RequestContext, user_id: impl Into<String>) -> RequestContext {
    ctx.with_identity(user_id)
}

/// Owned copy of the identity carried by `ctx`.
pub fn identity_from(ctx: &RequestContext) -> ServiceResult<String> {
    ctx.identity().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_identity() {
        let ctx = RequestContext::new();
        assert!(matches!(identity_from(&ctx), Err(ServiceError::NoIdentity)));
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_with_identity_derives_new_context() {
        let base = RequestContext::new();
        let derived = with_identity(&base, "user_123");

        assert_eq!(identity_from(&derived).unwrap(), "user_123");
        assert!(base.identity().is_err());

        let overridden = derived.with_identity("user_456");
        assert_eq!(overridden.identity().unwrap(), "user_456");
        assert_eq!(derived.identity().unwrap(), "user_123");
    }
}
