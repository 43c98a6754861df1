//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use lonkind_core::entities::{Notification, Post, ReactionEntry, ReactionState};
use lonkind_core::Snowflake;

use super::responses::{
    NotificationResponse, PostResponse, ReactionStateResponse, ReactorResponse,
};

// ============================================================================
// Post Mappers
// ============================================================================

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            media_urls: post.media_urls.clone(),
            reaction_counts: post.reaction_counts,
            comment_count: post.comment_count,
            created_at: post.created_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl ReactionStateResponse {
    pub fn new(post_id: Snowflake, state: ReactionState) -> Self {
        Self {
            post_id: post_id.to_string(),
            active: state.active,
            reaction_type: state.reaction_type,
            counts: state.counts,
        }
    }
}

impl From<&ReactionEntry> for ReactorResponse {
    fn from(entry: &ReactionEntry) -> Self {
        Self {
            user_id: entry.user_id.to_string(),
            reaction_type: entry.reaction_type,
            reacted_at: entry.reacted_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.as_str().to_string(),
            from_user: notification.from_user.to_string(),
            post_id: notification.post_id.map(|id| id.to_string()),
            reaction_type: notification.reaction_type,
            created_at: notification.created_at,
            read: notification.read,
        }
    }
}
