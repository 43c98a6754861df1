//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

use lonkind_core::Snowflake;

/// Counter for unique user ids across tests
static USER_COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// A user id no other test uses
pub fn unique_user() -> Snowflake {
    Snowflake::new(USER_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub media_urls: Vec<String>,
}

impl CreatePostRequest {
    pub fn text(content: &str) -> Self {
        Self {
            content: content.to_string(),
            media_urls: Vec::new(),
        }
    }
}

/// Reaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Counts {
    pub like: i64,
    pub love: i64,
    pub laugh: i64,
    pub sad: i64,
}

impl Counts {
    pub fn new(like: i64, love: i64, laugh: i64, sad: i64) -> Self {
        Self {
            like,
            love,
            laugh,
            sad,
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub media_urls: Vec<String>,
    pub reaction_counts: Counts,
}

/// Reaction state response
#[derive(Debug, Deserialize)]
pub struct ReactionStateResponse {
    pub post_id: String,
    pub active: bool,
    #[serde(rename = "type")]
    pub reaction_type: Option<String>,
    pub counts: Counts,
}

/// One reactor on a post
#[derive(Debug, Deserialize)]
pub struct ReactorResponse {
    pub user_id: String,
    #[serde(rename = "type")]
    pub reaction_type: String,
}

/// Notification entry
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub from_user: String,
    pub post_id: Option<String>,
    pub reaction_type: Option<String>,
    pub read: bool,
}

/// Notification feed page
#[derive(Debug, Deserialize)]
pub struct NotificationPage {
    pub data: Vec<NotificationResponse>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub before: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}
