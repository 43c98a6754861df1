//! # lonkind-cache
//!
//! Redis layer for live event fan-out.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Post-commit reaction and notification events, routed to
//!   `post:{id}` and `user:{id}` channels
//!
//! ## Example
//!
//! ```ignore
//! use lonkind_cache::{Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//! publisher.publish_domain_event(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{
    PubSubChannel, PubSubEvent, Publisher, BROADCAST_CHANNEL, POST_CHANNEL_PREFIX,
    USER_CHANNEL_PREFIX,
};
