//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub post_id: i64,
    pub user_id: i64,
    pub reaction_type: String,
    pub reacted_at: DateTime<Utc>,
}

/// Per-type entry count (from a GROUP BY query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTypeCountModel {
    pub reaction_type: String,
    pub count: i64,
}
