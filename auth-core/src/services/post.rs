use std::sync::Arc;
use validator::Validate;

use crate::{
    middleware::RequestContext,
    models::{CreatePostInput, Post},
    services::{ownership::authorize_mutation, store::{PostStore, StoreError}, ServiceError, ServiceResult},
    utils::validation::{first_error_message, is_valid_uuid},
};

/// Posts and replies. Every write needs an authenticated caller; deletes are
/// owner-only.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn all(&self) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.all().await?)
    }

    pub async fn create(&self, ctx: &RequestContext, input: CreatePostInput) -> ServiceResult<Post> {
        let user_id = requester(ctx)?;
        let body = validated_body(input)?;

        let post = self.posts.create(Post::new(body, user_id, None)).await?;
        tracing::info!(post_id = %post.id, user_id = %post.user_id, "Post created");
        Ok(post)
    }

    pub async fn create_reply(
        &self,
        ctx: &RequestContext,
        parent_id: &str,
        input: CreatePostInput,
    ) -> ServiceResult<Post> {
        let user_id = requester(ctx)?;
        let body = validated_body(input)?;
        ensure_uuid(parent_id)?;

        self.posts.find_by_id(parent_id).await.map_err(lookup_error)?;

        let post = self
            .posts
            .create(Post::new(body, user_id, Some(parent_id.to_string())))
            .await?;
        tracing::info!(post_id = %post.id, parent_id = %parent_id, "Reply created");
        Ok(post)
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Post> {
        ensure_uuid(id)?;

        self.posts.find_by_id(id).await.map_err(lookup_error)
    }

    /// Delete a post owned by the caller.
    ///
    /// Authentication is checked before the id is even looked at, existence
    /// before ownership.
    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> ServiceResult<()> {
        if !ctx.is_authenticated() {
            return Err(ServiceError::Unauthenticated);
        }
        ensure_uuid(id)?;

        let (user_id, post) = authorize_mutation(ctx, || self.posts.find_by_id(id)).await?;

        self.posts.delete(&post.id).await.map_err(lookup_error)?;

        tracing::info!(post_id = %post.id, user_id = %user_id, "Post deleted");
        Ok(())
    }
}

fn lookup_error(e: StoreError) -> ServiceError {
    if e.is_not_found() {
        ServiceError::NotFound
    } else {
        ServiceError::Storage(e)
    }
}

fn requester(ctx: &RequestContext) -> ServiceResult<String> {
    ctx.identity()
        .map(str::to_string)
        .map_err(|_| ServiceError::Unauthenticated)
}

fn validated_body(mut input: CreatePostInput) -> ServiceResult<String> {
    input.sanitize();
    input
        .validate()
        .map_err(|e| ServiceError::Validation(first_error_message(&e, &CreatePostInput::FIELD_ORDER)))?;
    Ok(input.body)
}

fn ensure_uuid(id: &str) -> ServiceResult<()> {
    if is_valid_uuid(id) {
        Ok(())
    } else {
        Err(ServiceError::InvalidId(id.to_string()))
    }
}
