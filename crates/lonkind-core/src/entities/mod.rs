//! Domain entities - core business objects

mod notification;
mod post;
mod reaction;

pub use notification::{Notification, NotificationKind};
pub use post::{Post, MAX_MEDIA_ATTACHMENTS, MAX_POST_LENGTH};
pub use reaction::{ReactionEntry, ReactionState, ReactionTransition};
