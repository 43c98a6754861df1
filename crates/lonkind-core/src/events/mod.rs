//! Domain events emitted after a committed state change

mod domain_event;

pub use domain_event::{DomainEvent, NotificationCreatedEvent, ReactionUpdatedEvent};
