//! PostgreSQL transactional store
//!
//! Every ledger unit runs at `SERIALIZABLE` isolation, so two units that
//! read the same entry or counters cannot both commit. The loser receives
//! SQLSTATE 40001 (mapped to `WriteConflict`) and the ledger re-runs it.

use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgPool};
use sqlx::{Postgres, Transaction};
use tracing::{debug, instrument};

use lonkind_core::entities::{Notification, ReactionEntry};
use lonkind_core::error::DomainError;
use lonkind_core::traits::{LedgerTransaction, RepoResult, TransactionalStore};
use lonkind_core::value_objects::{ReactionCounts, ReactionType, Snowflake};

use crate::models::{ReactionCountsModel, ReactionModel};
use crate::repositories::{map_db_error, map_tx_error};

#[derive(Clone)]
pub struct PgTransactionalStore {
    pool: PgPool,
}

impl PgTransactionalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TransactionalStore for PgTransactionalStore {
    #[instrument(skip(self))]
    async fn begin(&self) -> RepoResult<Box<dyn LedgerTransaction>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        Ok(Box::new(PgLedgerTransaction { tx: Some(tx) }))
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

/// One `SERIALIZABLE` transaction; dropped without commit it rolls back
pub struct PgLedgerTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgLedgerTransaction {
    fn conn(&mut self) -> RepoResult<&mut PgConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DomainError::InternalError("ledger transaction already finished".into()))
    }
}

fn counter_column(reaction_type: ReactionType) -> &'static str {
    match reaction_type {
        ReactionType::Like => "like_count",
        ReactionType::Love => "love_count",
        ReactionType::Laugh => "laugh_count",
        ReactionType::Sad => "sad_count",
    }
}

#[async_trait]
impl LedgerTransaction for PgLedgerTransaction {
    async fn get_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>> {
        let row = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, reaction_type, reacted_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(self.conn()?)
        .await
        .map_err(map_tx_error)?;

        row.map(ReactionEntry::try_from).transpose()
    }

    async fn read_counts(&mut self, post_id: Snowflake) -> RepoResult<Option<ReactionCounts>> {
        let row = sqlx::query_as::<_, ReactionCountsModel>(
            r#"
            SELECT like_count, love_count, laugh_count, sad_count
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_optional(self.conn()?)
        .await
        .map_err(map_tx_error)?;

        Ok(row.map(ReactionCounts::from))
    }

    async fn put_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<ReactionEntry> {
        let row = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO reactions (post_id, user_id, reaction_type, reacted_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (post_id, user_id)
            DO UPDATE SET reaction_type = EXCLUDED.reaction_type, reacted_at = EXCLUDED.reacted_at
            RETURNING post_id, user_id, reaction_type, reacted_at
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(reaction_type.as_str())
        .fetch_one(self.conn()?)
        .await
        .map_err(map_tx_error)?;

        ReactionEntry::try_from(row)
    }

    async fn delete_reaction(&mut self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM reactions WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(self.conn()?)
            .await
            .map_err(map_tx_error)?;
        Ok(())
    }

    async fn apply_delta(
        &mut self,
        post_id: Snowflake,
        reaction_type: ReactionType,
        delta: i64,
    ) -> RepoResult<ReactionCounts> {
        let column = counter_column(reaction_type);
        let row = sqlx::query_as::<_, ReactionCountsModel>(&format!(
            r#"
            UPDATE posts SET {column} = GREATEST({column} + $2, 0)
            WHERE id = $1
            RETURNING like_count, love_count, laugh_count, sad_count
            "#
        ))
        .bind(post_id.into_inner())
        .bind(delta)
        .fetch_optional(self.conn()?)
        .await
        .map_err(map_tx_error)?;

        row.map(ReactionCounts::from)
            .ok_or(DomainError::PostNotFound(post_id))
    }

    async fn has_reaction_notification(
        &mut self,
        post_id: Snowflake,
        from_user: Snowflake,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notifications
                WHERE post_id = $1 AND from_user = $2 AND kind = 'new_reaction'
            )
            "#,
        )
        .bind(post_id.into_inner())
        .bind(from_user.into_inner())
        .fetch_one(self.conn()?)
        .await
        .map_err(map_tx_error)
    }

    async fn append_notification(&mut self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, recipient_id, kind, from_user, post_id, reaction_type, created_at, read)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.into_inner())
        .bind(notification.recipient_id.into_inner())
        .bind(notification.kind.as_str())
        .bind(notification.from_user.into_inner())
        .bind(notification.post_id.map(Snowflake::into_inner))
        .bind(notification.reaction_type.map(ReactionType::as_str))
        .bind(notification.created_at)
        .bind(notification.read)
        .execute(self.conn()?)
        .await
        .map_err(map_tx_error)?;
        Ok(())
    }

    async fn commit(&mut self) -> RepoResult<()> {
        match self.tx.take() {
            Some(tx) => tx.commit().await.map_err(map_tx_error),
            None => Err(DomainError::InternalError("ledger transaction already finished".into())),
        }
    }

    async fn rollback(&mut self) -> RepoResult<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await.map_err(map_db_error)?;
            debug!("Ledger transaction rolled back");
        }
        Ok(())
    }
}
