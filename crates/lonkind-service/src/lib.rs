//! # lonkind-service
//!
//! Application layer: the reaction ledger, post and notification services,
//! and the DTOs the API serializes.

pub mod dto;
pub mod services;

pub use services::{
    run_atomic, NotificationService, PostService, ReactionLedger, RetryPolicy, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
