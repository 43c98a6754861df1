//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lonkind_core::entities::Post;
use lonkind_core::error::DomainError;
use lonkind_core::traits::{PostRepository, RepoResult};
use lonkind_core::value_objects::Snowflake;

use crate::models::PostModel;

use super::error::{map_db_error, map_unique_violation};

const POST_COLUMNS: &str = "id, author_id, content, media_urls, like_count, love_count, \
                            laugh_count, sad_count, comment_count, created_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, media_urls, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(post.media_urls.as_slice())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ValidationError(format!("post {} already exists", post.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY id DESC LIMIT $2"
        ))
        .bind(author_id.into_inner())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}
