//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lonkind_core::entities::Notification;
use lonkind_core::error::DomainError;
use lonkind_core::traits::{NotificationQuery, NotificationRepository, RepoResult};
use lonkind_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, kind, from_user, post_id, reaction_type, created_at, read
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r#"
            SELECT id, recipient_id, kind, from_user, post_id, reaction_type, created_at, read
            FROM notifications
            WHERE recipient_id = $1 AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Notification::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, recipient_id: Snowflake, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET read = TRUE
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(recipient_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT read",
        )
        .bind(recipient_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
