//! Database models - SQLx-compatible structs for PostgreSQL tables

mod notification;
mod post;
mod reaction;

pub use notification::NotificationModel;
pub use post::{PostModel, ReactionCountsModel};
pub use reaction::{ReactionModel, ReactionTypeCountModel};
