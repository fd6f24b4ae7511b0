//! Ownership rule for mutating resources.

use std::future::Future;

use crate::middleware::RequestContext;
use crate::services::store::StoreResult;
use crate::services::{ServiceError, ServiceResult};

/// A resource with a single owning user.
pub trait Ownable {
    fn owner_id(&self) -> &str;
}

/// True iff `requester_id` owns `resource`.
pub fn can_mutate<R: Ownable + ?Sized>(resource: &R, requester_id: &str) -> bool {
    resource.owner_id() == requester_id
}

/// Resolve the caller, load the resource, then check ownership.
///
/// The order is fixed: an anonymous caller gets `Unauthenticated` even for a
/// missing resource, and only an authenticated caller learns `NotFound` before
/// `Forbidden`. Returns the requester id and the resource.
pub async fn authorize_mutation<R, F, Fut>(ctx: &RequestContext, fetch: F) -> ServiceResult<(String, R)>
where
    R: Ownable,
    F: FnOnce() -> Fut,
    Fut: Future<Output = StoreResult<R>>,
{
    let requester_id = ctx
        .identity()
        .map_err(|_| ServiceError::Unauthenticated)?
        .to_string();

    let resource = fetch().await.map_err(|e| {
        if e.is_not_found() {
            ServiceError::NotFound
        } else {
            ServiceError::Storage(e)
        }
    })?;

    if !can_mutate(&resource, &requester_id) {
        tracing::warn!(requester_id = %requester_id, "Ownership check refused mutation");
        return Err(ServiceError::Forbidden);
    }

    Ok((requester_id, resource))
}
