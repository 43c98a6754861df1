//! Repository traits (ports) - read paths and non-ledger writes
//!
//! Reaction counters and entries are only mutated through
//! [`LedgerTransaction`](super::LedgerTransaction); these traits cover
//! everything else.

use async_trait::async_trait;

use crate::entities::{Notification, Post, ReactionEntry};
use crate::error::DomainError;
use crate::value_objects::{ReactionCounts, ReactionType, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, counters included
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Create a new post with zeroed counters
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Newest posts by an author
    async fn find_by_author(&self, author_id: Snowflake, limit: i64) -> RepoResult<Vec<Post>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the entry for a (post, user) pair
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<ReactionEntry>>;

    /// Entries on a post, oldest first, optionally of one type
    async fn find_by_post(
        &self,
        post_id: Snowflake,
        reaction_type: Option<ReactionType>,
        limit: i64,
    ) -> RepoResult<Vec<ReactionEntry>>;

    /// Recount a post's entries by type
    async fn count_by_type(&self, post_id: Snowflake) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Cursor query for a notification feed, newest first
#[derive(Debug, Clone, Copy)]
pub struct NotificationQuery {
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            before: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>>;

    /// Set the read flag; `NotificationNotFound` unless the row belongs to `recipient_id`
    async fn mark_read(&self, recipient_id: Snowflake, id: Snowflake) -> RepoResult<()>;

    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;
}
