//! Notification entity - an entry in a user's append-only feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactionType, Snowflake};

/// Notification kinds written to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewReaction,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewReaction => "new_reaction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_reaction" => Some(Self::NewReaction),
            _ => None,
        }
    }
}

/// Notification entity
///
/// Append-only apart from the `read` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub kind: NotificationKind,
    pub from_user: Snowflake,
    pub post_id: Option<Snowflake>,
    pub reaction_type: Option<ReactionType>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    /// Notification telling a post author that someone reacted
    pub fn new_reaction(
        id: Snowflake,
        recipient_id: Snowflake,
        from_user: Snowflake,
        post_id: Snowflake,
        reaction_type: ReactionType,
    ) -> Self {
        Self {
            id,
            recipient_id,
            kind: NotificationKind::NewReaction,
            from_user,
            post_id: Some(post_id),
            reaction_type: Some(reaction_type),
            created_at: Utc::now(),
            read: false,
        }
    }

    #[inline]
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Whether this is the reaction notice for `from_user` on `post_id`
    pub fn is_reaction_from(&self, post_id: Snowflake, from_user: Snowflake) -> bool {
        self.kind == NotificationKind::NewReaction
            && self.post_id == Some(post_id)
            && self.from_user == from_user
    }
}
