//! Transactional store contract used by the reaction ledger
//!
//! A `LedgerTransaction` is one atomic unit spanning reaction entries, post
//! counters, and the notification feed. Nothing it writes is visible to
//! others until `commit` succeeds. A commit that loses a race reports
//! `DomainError::WriteConflict`, and the caller re-runs the whole unit
//! against fresh state.

use async_trait::async_trait;

use crate::entities::{Notification, ReactionEntry};
use crate::traits::RepoResult;
use crate::value_objects::{ReactionCounts, ReactionType, Snowflake};

#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Open a new atomic unit
    async fn begin(&self) -> RepoResult<Box<dyn LedgerTransaction>>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> RepoResult<()>;
}

#[async_trait]
pub trait LedgerTransaction: Send {
    /// Read the caller's entry for a post, seeing this unit's own writes
    async fn get_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionEntry>>;

    /// Read the post's counters; `None` when the post does not exist
    async fn read_counts(&mut self, post_id: Snowflake) -> RepoResult<Option<ReactionCounts>>;

    /// Write or overwrite the entry; the store assigns `reacted_at`
    async fn put_reaction(
        &mut self,
        post_id: Snowflake,
        user_id: Snowflake,
        reaction_type: ReactionType,
    ) -> RepoResult<ReactionEntry>;

    async fn delete_reaction(&mut self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Add `delta` to one counter, flooring at zero. Returns the counters
    /// after the change; a missing post is `PostNotFound`.
    async fn apply_delta(
        &mut self,
        post_id: Snowflake,
        reaction_type: ReactionType,
        delta: i64,
    ) -> RepoResult<ReactionCounts>;

    /// Whether a `new_reaction` notification from `from_user` on this post exists
    async fn has_reaction_notification(
        &mut self,
        post_id: Snowflake,
        from_user: Snowflake,
    ) -> RepoResult<bool>;

    async fn append_notification(&mut self, notification: &Notification) -> RepoResult<()>;

    async fn commit(&mut self) -> RepoResult<()>;

    /// Discard every staged write; a no-op after commit
    async fn rollback(&mut self) -> RepoResult<()>;
}
