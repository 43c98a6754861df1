//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement
//! `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
///
/// Shape is checked here; the "text or media" rule is enforced by
/// `Post::validate`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(max = 5000, message = "Content must be at most 5000 characters"))]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 media attachments"))]
    pub media_urls: Vec<String>,
}

// ============================================================================
// Reaction Queries
// ============================================================================

/// Query for listing who reacted to a post
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactorsQuery {
    /// Restrict to one reaction type
    #[serde(rename = "type")]
    pub reaction_type: Option<String>,
    pub limit: Option<i64>,
}

// ============================================================================
// Notification Queries
// ============================================================================

/// Query for the notification feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsQuery {
    /// Only notifications older than this id
    pub before: Option<String>,
    pub limit: Option<i64>,
}
