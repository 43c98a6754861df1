//! Redis Pub/Sub module.
//!
//! Live clients subscribe to these channels through whatever push transport
//! sits in front of the service.

mod channels;
mod publisher;

pub use channels::{PubSubChannel, BROADCAST_CHANNEL, POST_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};
pub use publisher::{PubSubEvent, Publisher};
