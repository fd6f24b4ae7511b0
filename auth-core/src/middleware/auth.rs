use http::Request;

use crate::middleware::context::RequestContext;
use crate::services::AuthTokenService;

/// Attach the caller's identity to `request` when it carries a valid token.
///
/// Requests without a usable credential pass through anonymously; operations
/// that need an identity reject them later with `Unauthenticated`.
pub fn authenticate<B>(tokens: &dyn AuthTokenService, mut request: Request<B>) -> Request<B> {
    let token = match tokens.parse_token_from_headers(request.headers()) {
        Ok(token) => token,
        Err(_) => return request,
    };

    tracing::Span::current().record("user_id", token.subject.as_str());

    let ctx = RequestContext::from_request(&request).with_identity(token.subject);
    request.extensions_mut().insert(ctx);
    request
}
