//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lonkind_core::entities::ReactionEntry;
use lonkind_core::traits::{ReactionRepository, RepoResult};
use lonkind_core::value_objects::{ReactionCounts, ReactionType, Snowflake};

use crate::mappers::counts_from_rows;
use crate::models::{ReactionModel, ReactionTypeCountModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ReactionEntry>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, reaction_type, reacted_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactionEntry::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(
        &self,
        post_id: Snowflake,
        reaction_type: Option<ReactionType>,
        limit: i64,
    ) -> RepoResult<Vec<ReactionEntry>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, reaction_type, reacted_at
            FROM reactions
            WHERE post_id = $1 AND ($2::TEXT IS NULL OR reaction_type = $2)
            ORDER BY reacted_at, user_id
            LIMIT $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(reaction_type.map(ReactionType::as_str))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ReactionEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_type(&self, post_id: Snowflake) -> RepoResult<ReactionCounts> {
        let rows = sqlx::query_as::<_, ReactionTypeCountModel>(
            r#"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE post_id = $1
            GROUP BY reaction_type
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        counts_from_rows(rows)
    }
}
