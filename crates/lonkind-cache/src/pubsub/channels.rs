//! Pub/Sub channel naming.

use lonkind_core::Snowflake;

/// Channel prefix for per-post events (counter updates)
pub const POST_CHANNEL_PREFIX: &str = "post:";
/// Channel prefix for user-specific events (notifications)
pub const USER_CHANNEL_PREFIX: &str = "user:";
/// Channel for broadcast events
pub const BROADCAST_CHANNEL: &str = "broadcast";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Everyone viewing a post
    Post(Snowflake),
    /// All sessions of one user
    User(Snowflake),
    Broadcast,
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn post(post_id: Snowflake) -> Self {
        Self::Post(post_id)
    }

    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Post(id) => format!("{POST_CHANNEL_PREFIX}{id}"),
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
            Self::Broadcast => BROADCAST_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == BROADCAST_CHANNEL {
            return Self::Broadcast;
        }

        let scoped = [
            (POST_CHANNEL_PREFIX, Self::Post as fn(Snowflake) -> Self),
            (USER_CHANNEL_PREFIX, Self::User),
        ];
        for (prefix, make) in scoped {
            if let Some(id) = name.strip_prefix(prefix).and_then(|s| Snowflake::parse(s).ok()) {
                return make(id);
            }
        }

        Self::Custom(name.to_string())
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
