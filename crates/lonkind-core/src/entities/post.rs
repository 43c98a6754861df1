//! Post entity - a piece of content carrying aggregate reaction counters

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ReactionCounts, Snowflake};

/// Maximum post body length in characters
pub const MAX_POST_LENGTH: usize = 5000;

/// Maximum number of media references on a single post
pub const MAX_MEDIA_ATTACHMENTS: usize = 10;

/// Post entity
///
/// `reaction_counts` is derived state: it only changes through ledger
/// deltas committed together with the matching reaction entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub media_urls: Vec<String>,
    pub reaction_counts: ReactionCounts,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with zeroed counters
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        media_urls: Vec<String>,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            media_urls,
            reaction_counts: ReactionCounts::default(),
            comment_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Check the content rules: some text or at least one media reference
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.content.chars().count() > MAX_POST_LENGTH {
            return Err(DomainError::ContentTooLong { max: MAX_POST_LENGTH });
        }
        if self.media_urls.len() > MAX_MEDIA_ATTACHMENTS {
            return Err(DomainError::TooManyMedia { max: MAX_MEDIA_ATTACHMENTS });
        }
        if self.content.trim().is_empty() && !self.has_media() {
            return Err(DomainError::EmptyPost);
        }
        Ok(())
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    #[inline]
    pub fn has_media(&self) -> bool {
        !self.media_urls.is_empty()
    }
}
