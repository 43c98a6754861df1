//! # lonkind-core
//!
//! Domain layer for the Lonkind reaction ledger: entities, value objects,
//! the transactional store contract, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Notification, NotificationKind, Post, ReactionEntry, ReactionState, ReactionTransition,
    MAX_MEDIA_ATTACHMENTS, MAX_POST_LENGTH,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    LedgerTransaction, NotificationQuery, NotificationRepository, PostRepository,
    ReactionRepository, RepoResult, TransactionalStore,
};
pub use value_objects::{
    ReactionCounts, ReactionType, ReactionTypeParseError, Snowflake, SnowflakeGenerator,
    SnowflakeParseError,
};
