//! Repository implementations
//!
//! PostgreSQL implementations of the read-side repository traits defined in
//! lonkind-core. Ledger writes go through [`crate::store`].

mod error;
mod notification;
mod post;
mod reaction;

pub(crate) use error::{map_db_error, map_tx_error};
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
