//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Too many media attachments: max {max}")]
    TooManyMedia { max: usize },

    #[error("Post must have text or at least one media attachment")]
    EmptyPost,

    #[error("Invalid reaction type: {0}")]
    InvalidReactionType(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot react to your own post")]
    SelfReaction,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // =========================================================================
    // Concurrency Errors
    // =========================================================================
    #[error("Write conflict: {0}")]
    WriteConflict(String),

    #[error("Storage timed out: {0}")]
    StorageTimeout(String),

    #[error("Storage unavailable after {attempts} attempts")]
    TransientStorage { attempts: u32 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::TooManyMedia { .. } => "TOO_MANY_MEDIA",
            Self::EmptyPost => "EMPTY_POST",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",

            // Business Rules
            Self::SelfReaction => "SELF_REACTION",

            // Authorization
            Self::PermissionDenied(_) => "PERMISSION_DENIED",

            // Concurrency
            Self::WriteConflict(_) => "WRITE_CONFLICT",
            Self::StorageTimeout(_) => "STORAGE_TIMEOUT",
            Self::TransientStorage { .. } => "STORAGE_UNAVAILABLE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_) | Self::NotificationNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ContentTooLong { .. }
                | Self::TooManyMedia { .. }
                | Self::EmptyPost
                | Self::InvalidReactionType(_)
        )
    }

    /// Check if the request broke a domain rule
    pub fn is_business_rule(&self) -> bool {
        matches!(self, Self::SelfReaction)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Check if the atomic unit may be re-run against fresh state
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WriteConflict(_) | Self::StorageTimeout(_))
    }

    /// Check if the store gave up after bounded retries
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::TransientStorage { .. })
    }
}
