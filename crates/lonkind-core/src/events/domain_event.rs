//! Domain events - published after the atomic unit has committed
//!
//! Subscribers use these to refresh counters and notification badges live.
//! Delivery is best effort; the committed store state is authoritative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Notification, NotificationKind, ReactionState};
use crate::value_objects::{ReactionType, Snowflake};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionUpdate(ReactionUpdatedEvent),
    NotificationCreate(NotificationCreatedEvent),
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionUpdate(_) => "REACTION_UPDATE",
            Self::NotificationCreate(_) => "NOTIFICATION_CREATE",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionUpdate(e) => e.timestamp,
            Self::NotificationCreate(e) => e.timestamp,
        }
    }

    pub fn reaction_update(post_id: Snowflake, user_id: Snowflake, state: ReactionState) -> Self {
        Self::ReactionUpdate(ReactionUpdatedEvent {
            post_id,
            user_id,
            state,
            timestamp: Utc::now(),
        })
    }

    pub fn notification_create(notification: &Notification) -> Self {
        Self::NotificationCreate(NotificationCreatedEvent {
            notification_id: notification.id,
            recipient_id: notification.recipient_id,
            kind: notification.kind,
            from_user: notification.from_user,
            post_id: notification.post_id,
            reaction_type: notification.reaction_type,
            timestamp: notification.created_at,
        })
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionUpdatedEvent {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub state: ReactionState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification_id: Snowflake,
    pub recipient_id: Snowflake,
    pub kind: NotificationKind,
    pub from_user: Snowflake,
    pub post_id: Option<Snowflake>,
    pub reaction_type: Option<ReactionType>,
    pub timestamp: DateTime<Utc>,
}
