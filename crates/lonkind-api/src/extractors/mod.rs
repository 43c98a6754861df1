//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path ids and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::{FeedPagination, ReactorsFilter};
pub use path::{NotificationIdPath, PostIdPath, ReactionPath};
pub use validated::ValidatedJson;
