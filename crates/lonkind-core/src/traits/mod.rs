//! Ports implemented by the infrastructure layer

mod repositories;
mod store;

pub use repositories::{
    NotificationQuery, NotificationRepository, PostRepository, ReactionRepository, RepoResult,
};
pub use store::{LedgerTransaction, TransactionalStore};
