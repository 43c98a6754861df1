//! Post service
//!
//! Creates posts and reads them back with their reaction counters.

use lonkind_core::entities::Post;
use lonkind_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest page of an author's posts returned at once
const MAX_POSTS_LIMIT: i64 = 100;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post with zeroed counters
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        if request.media_urls.iter().any(|url| url.trim().is_empty()) {
            return Err(ServiceError::validation("Media URLs must not be blank"));
        }

        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.content,
            request.media_urls,
        );
        post.validate()?;

        self.ctx.post_repo().create(&post).await?;

        info!(
            post_id = %post.id,
            author_id = %author_id,
            media = post.media_urls.len(),
            "Post created"
        );

        Ok(PostResponse::from(post))
    }

    /// Get a post by ID
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        Ok(PostResponse::from(post))
    }

    /// An author's posts, newest first
    #[instrument(skip(self))]
    pub async fn list_by_author(
        &self,
        author_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self
            .ctx
            .post_repo()
            .find_by_author(author_id, limit.clamp(1, MAX_POSTS_LIMIT))
            .await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lonkind_common::JwtService;
    use lonkind_core::SnowflakeGenerator;
    use lonkind_db::MemoryStore;

    fn context() -> ServiceContext {
        ServiceContext::builder()
            .memory_store(&MemoryStore::new())
            .jwt_service(Arc::new(JwtService::new("test-secret", 60)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap()
    }

    fn request(content: &str, media: usize) -> CreatePostRequest {
        CreatePostRequest {
            content: content.to_string(),
            media_urls: (0..media)
                .map(|i| format!("https://cdn.lonkind.app/{i}.jpg"))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let ctx = context();
        let service = PostService::new(&ctx);
        let author = Snowflake::new(42);

        let created = service.create(author, request("hello", 1)).await.unwrap();
        assert_eq!(created.author_id, "42");
        assert_eq!(created.reaction_counts.total(), 0);

        let id = Snowflake::parse(&created.id).unwrap();
        let fetched = service.get_post(id).await.unwrap();
        assert_eq!(fetched.content, "hello");
        assert_eq!(fetched.media_urls.len(), 1);

        let listed = service.list_by_author(author, 10).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_posts() {
        let ctx = context();
        let service = PostService::new(&ctx);
        let author = Snowflake::new(42);

        let err = service.create(author, request("", 0)).await.unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_POST");

        let err = service.create(author, request("x", 11)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let blank = CreatePostRequest {
            content: String::new(),
            media_urls: vec![" ".to_string()],
        };
        let err = service.create(author, blank).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let ctx = context();
        let err = PostService::new(&ctx)
            .get_post(Snowflake::new(7))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_POST");
    }
}
