//! Redis Pub/Sub publisher.

use lonkind_core::events::DomainEvent;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Envelope for Pub/Sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REACTION_UPDATE")
    pub event_type: String,
    pub data: serde_json::Value,
}

impl PubSubEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event.event_type(), serde_json::to_value(event)?))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Channel a domain event is delivered on
#[must_use]
pub fn route(event: &DomainEvent) -> PubSubChannel {
    match event {
        DomainEvent::ReactionUpdate(e) => PubSubChannel::post(e.post_id),
        DomainEvent::NotificationCreate(e) => PubSubChannel::user(e.recipient_id),
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    /// Publish an event to a channel, returning the receiver count
    pub async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a domain event on the channel its subject lives on
    pub async fn publish_domain_event(&self, event: &DomainEvent) -> RedisResult<u32> {
        let envelope = PubSubEvent::from_domain(event)?;
        self.publish(&route(event), &envelope).await
    }
}
