//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: String,
    pub from_user: i64,
    pub post_id: Option<i64>,
    pub reaction_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}
