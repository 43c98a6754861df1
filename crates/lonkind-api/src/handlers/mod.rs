//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod notifications;
pub mod posts;
pub mod reactions;
