//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use lonkind_common::error::domain_status;
use lonkind_common::AppError;
use lonkind_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or storage failure
    Domain(DomainError),

    /// Application error (auth, config, etc.)
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lonkind_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Post", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Post not found: 123"));
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("limit must be positive");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::SelfReaction, 400, "SELF_REACTION"),
            (DomainError::PostNotFound(Snowflake::new(7)), 404, "UNKNOWN_POST"),
            (
                DomainError::NotificationNotFound(Snowflake::new(8)),
                404,
                "UNKNOWN_NOTIFICATION",
            ),
            (DomainError::PermissionDenied("rules".into()), 403, "PERMISSION_DENIED"),
            (
                DomainError::TransientStorage { attempts: 5 },
                503,
                "STORAGE_UNAVAILABLE",
            ),
            (DomainError::EmptyPost, 400, "EMPTY_POST"),
        ];

        for (domain, status, code) in cases {
            let err = ServiceError::from(domain);
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_as_domain() {
        let err = ServiceError::from(DomainError::SelfReaction);
        assert!(matches!(err.as_domain(), Some(DomainError::SelfReaction)));
        assert!(ServiceError::internal("boom").as_domain().is_none());
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::not_found("Notification", "456");
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::from(DomainError::SelfReaction).into();
        assert_eq!(app_err.error_code(), "SELF_REACTION");
    }
}
