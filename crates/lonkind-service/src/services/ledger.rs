//! Reaction ledger
//!
//! Owns the one-reaction-per-user-per-post rule. A toggle reads the caller's
//! entry and the post counters, then adds, switches, or removes the entry,
//! adjusts the counters, and records the first-reaction notification. All of
//! it commits as one atomic unit or not at all.

use lonkind_core::entities::{Notification, ReactionEntry, ReactionState, ReactionTransition};
use lonkind_core::traits::{LedgerTransaction, RepoResult};
use lonkind_core::{DomainError, DomainEvent, ReactionCounts, ReactionType, Snowflake};
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::retry::run_atomic;

/// Largest page of reactors returned at once
const MAX_REACTORS_LIMIT: i64 = 100;

/// Inputs of one toggle, fixed across retries
#[derive(Debug, Clone, Copy)]
struct ToggleCommand {
    post_id: Snowflake,
    acting_user: Snowflake,
    post_author: Snowflake,
    reaction_type: ReactionType,
    notification_id: Snowflake,
}

/// What a committed toggle did
#[derive(Debug)]
struct ToggleOutcome {
    state: ReactionState,
    transition: ReactionTransition,
    notification: Option<Notification>,
}

/// Reaction ledger service
pub struct ReactionLedger<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionLedger<'a> {
    /// Create a new ReactionLedger
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle `acting_user`'s reaction of `reaction_type` on a post
    ///
    /// Same type as the current entry removes it; anything else sets it.
    /// Returns the committed state.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        post_id: Snowflake,
        acting_user: Snowflake,
        post_author: Snowflake,
        reaction_type: ReactionType,
    ) -> ServiceResult<ReactionState> {
        if acting_user == post_author {
            return Err(DomainError::SelfReaction.into());
        }

        // Generated once so every retry appends the same notification
        let command = ToggleCommand {
            post_id,
            acting_user,
            post_author,
            reaction_type,
            notification_id: self.ctx.generate_id(),
        };

        let outcome = run_atomic(self.ctx.store(), self.ctx.retry_policy(), move |tx| {
            Box::pin(apply_toggle(tx, command))
        })
        .await?;

        info!(
            post_id = %post_id,
            user_id = %acting_user,
            reaction_type = %reaction_type,
            transition = outcome.transition.as_str(),
            notified = outcome.notification.is_some(),
            "Reaction toggled"
        );

        self.publish(post_id, acting_user, &outcome).await;

        Ok(outcome.state)
    }

    /// Toggle on a stored post, resolving its author first
    #[instrument(skip(self))]
    pub async fn toggle_on_post(
        &self,
        post_id: Snowflake,
        acting_user: Snowflake,
        reaction_type: ReactionType,
    ) -> ServiceResult<ReactionState> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        self.toggle(post_id, acting_user, post.author_id, reaction_type)
            .await
    }

    /// The caller's current reaction on a post, with the post's counters
    #[instrument(skip(self))]
    pub async fn reaction_state(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ReactionState> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let entry = self.ctx.reaction_repo().find(post_id, user_id).await?;

        Ok(ReactionState::from_entry(entry.as_ref(), post.reaction_counts))
    }

    /// Entries on a post, oldest first
    #[instrument(skip(self))]
    pub async fn list_reactors(
        &self,
        post_id: Snowflake,
        reaction_type: Option<ReactionType>,
        limit: i64,
    ) -> ServiceResult<Vec<ReactionEntry>> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let entries = self
            .ctx
            .reaction_repo()
            .find_by_post(post_id, reaction_type, limit.clamp(1, MAX_REACTORS_LIMIT))
            .await?;

        Ok(entries)
    }

    /// Best-effort fan-out after commit
    async fn publish(&self, post_id: Snowflake, user_id: Snowflake, outcome: &ToggleOutcome) {
        let Some(publisher) = self.ctx.publisher() else {
            return;
        };

        let mut events = vec![DomainEvent::reaction_update(post_id, user_id, outcome.state)];
        if let Some(notification) = &outcome.notification {
            events.push(DomainEvent::notification_create(notification));
        }

        for event in &events {
            if let Err(e) = publisher.publish_domain_event(event).await {
                warn!(
                    error = %e,
                    event_type = event.event_type(),
                    post_id = %post_id,
                    "Failed to publish event"
                );
            }
        }
    }
}

/// The read-modify-write body of a toggle, run inside one transaction
async fn apply_toggle(
    tx: &mut dyn LedgerTransaction,
    cmd: ToggleCommand,
) -> RepoResult<ToggleOutcome> {
    let existing = tx.get_reaction(cmd.post_id, cmd.acting_user).await?;
    let counts = tx
        .read_counts(cmd.post_id)
        .await?
        .ok_or(DomainError::PostNotFound(cmd.post_id))?;

    // Same type again: take it back
    if existing.as_ref().is_some_and(|e| e.is_type(cmd.reaction_type)) {
        tx.delete_reaction(cmd.post_id, cmd.acting_user).await?;
        let counts = decrement(tx, cmd.post_id, cmd.reaction_type, counts).await?;
        return Ok(ToggleOutcome {
            state: ReactionState::inactive(counts),
            transition: ReactionTransition::Removed,
            notification: None,
        });
    }

    let previous = existing.map(|e| e.reaction_type);
    if let Some(previous_type) = previous {
        decrement(tx, cmd.post_id, previous_type, counts).await?;
    }

    tx.put_reaction(cmd.post_id, cmd.acting_user, cmd.reaction_type)
        .await?;
    let counts = tx.apply_delta(cmd.post_id, cmd.reaction_type, 1).await?;

    // Only a fresh reaction notifies, and only once per (user, post)
    let mut notification = None;
    if previous.is_none()
        && !tx
            .has_reaction_notification(cmd.post_id, cmd.acting_user)
            .await?
    {
        let entry = Notification::new_reaction(
            cmd.notification_id,
            cmd.post_author,
            cmd.acting_user,
            cmd.post_id,
            cmd.reaction_type,
        );
        tx.append_notification(&entry).await?;
        notification = Some(entry);
    }

    let transition = match previous {
        Some(from) => ReactionTransition::Switched { from },
        None => ReactionTransition::Added,
    };

    Ok(ToggleOutcome {
        state: ReactionState::active(cmd.reaction_type, counts),
        transition,
        notification,
    })
}

/// Take one off a counter. A counter already at zero while an entry of that
/// type exists means the ledger drifted; it stays floored at zero.
async fn decrement(
    tx: &mut dyn LedgerTransaction,
    post_id: Snowflake,
    reaction_type: ReactionType,
    counts: ReactionCounts,
) -> RepoResult<ReactionCounts> {
    if counts.get(reaction_type) <= 0 {
        error!(
            post_id = %post_id,
            reaction_type = %reaction_type,
            "Reaction counter already zero on removal"
        );
        return Ok(counts);
    }
    tx.apply_delta(post_id, reaction_type, -1).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use lonkind_common::JwtService;
    use lonkind_core::entities::Post;
    use lonkind_core::traits::PostRepository;
    use lonkind_core::SnowflakeGenerator;
    use lonkind_db::MemoryStore;

    use crate::services::RetryPolicy;

    const AUTHOR: Snowflake = Snowflake::new(1);
    const READER: Snowflake = Snowflake::new(2);

    async fn setup() -> (ServiceContext, MemoryStore, Snowflake) {
        let store = MemoryStore::new();
        let ctx = ServiceContext::builder()
            .memory_store(&store)
            .jwt_service(Arc::new(JwtService::new("test-secret", 60)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .retry_policy(RetryPolicy::new(3, Duration::ZERO))
            .build()
            .unwrap();

        let post = Post::new(ctx.generate_id(), AUTHOR, "hello".to_string(), vec![]);
        store.create(&post).await.unwrap();
        (ctx, store, post.id)
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let (ctx, _store, post_id) = setup().await;
        let ledger = ReactionLedger::new(&ctx);

        let state = ledger
            .toggle(post_id, READER, AUTHOR, ReactionType::Like)
            .await
            .unwrap();
        assert!(state.active);
        assert_eq!(state.reaction_type, Some(ReactionType::Like));
        assert_eq!(state.counts.like, 1);

        let state = ledger
            .toggle(post_id, READER, AUTHOR, ReactionType::Like)
            .await
            .unwrap();
        assert!(!state.active);
        assert_eq!(state.reaction_type, None);
        assert_eq!(state.counts.like, 0);
    }

    #[tokio::test]
    async fn test_self_reaction_touches_nothing() {
        let (ctx, store, post_id) = setup().await;

        let err = ReactionLedger::new(&ctx)
            .toggle(post_id, AUTHOR, AUTHOR, ReactionType::Love)
            .await
            .unwrap_err();

        assert!(matches!(err.as_domain(), Some(DomainError::SelfReaction)));
        assert_eq!(store.transactions_started(), 0);
    }

    #[tokio::test]
    async fn test_toggle_on_missing_post() {
        let (ctx, store, _post_id) = setup().await;
        let missing = Snowflake::new(999);

        let err = ReactionLedger::new(&ctx)
            .toggle(missing, READER, AUTHOR, ReactionType::Sad)
            .await
            .unwrap_err();

        assert!(matches!(err.as_domain(), Some(DomainError::PostNotFound(id)) if *id == missing));
        assert_eq!(store.transactions_started(), 1);
        assert_eq!(store.notification_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_on_post_resolves_author() {
        let (ctx, _store, post_id) = setup().await;
        let ledger = ReactionLedger::new(&ctx);

        let err = ledger
            .toggle_on_post(post_id, AUTHOR, ReactionType::Like)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let state = ledger
            .toggle_on_post(post_id, READER, ReactionType::Laugh)
            .await
            .unwrap();
        assert_eq!(state.counts.laugh, 1);

        let err = ledger
            .toggle_on_post(Snowflake::new(404), READER, ReactionType::Laugh)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_reaction_state_and_reactors() {
        let (ctx, _store, post_id) = setup().await;
        let ledger = ReactionLedger::new(&ctx);

        let state = ledger.reaction_state(post_id, READER).await.unwrap();
        assert!(!state.active);

        ledger
            .toggle(post_id, READER, AUTHOR, ReactionType::Love)
            .await
            .unwrap();
        ledger
            .toggle(post_id, Snowflake::new(3), AUTHOR, ReactionType::Sad)
            .await
            .unwrap();

        let state = ledger.reaction_state(post_id, READER).await.unwrap();
        assert_eq!(state.reaction_type, Some(ReactionType::Love));
        assert_eq!(state.counts.total(), 2);

        let all = ledger.list_reactors(post_id, None, 0).await.unwrap();
        assert_eq!(all.len(), 1, "limit is clamped to at least one");

        let all = ledger.list_reactors(post_id, None, 500).await.unwrap();
        assert_eq!(all.len(), 2);

        let sad = ledger
            .list_reactors(post_id, Some(ReactionType::Sad), 10)
            .await
            .unwrap();
        assert_eq!(sad.len(), 1);
        assert_eq!(sad[0].user_id, Snowflake::new(3));
    }
}
