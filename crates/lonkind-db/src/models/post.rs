//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub media_urls: Vec<String>,
    pub like_count: i64,
    pub love_count: i64,
    pub laugh_count: i64,
    pub sad_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Counter columns only, as read and returned inside ledger transactions
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReactionCountsModel {
    pub like_count: i64,
    pub love_count: i64,
    pub laugh_count: i64,
    pub sad_count: i64,
}
