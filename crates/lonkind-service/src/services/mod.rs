//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and expose one use case per method.

pub mod context;
pub mod error;
pub mod ledger;
pub mod notification;
pub mod post;
pub mod retry;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ledger::ReactionLedger;
pub use notification::NotificationService;
pub use post::PostService;
pub use retry::{run_atomic, RetryPolicy};
