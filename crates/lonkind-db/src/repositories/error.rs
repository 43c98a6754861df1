//! Error handling utilities for repositories

use lonkind_core::error::DomainError;
use sqlx::Error as SqlxError;

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Convert SQLx error to DomainError
///
/// Serialization failures, deadlocks, and pool timeouts are retryable;
/// privilege errors surface as `PermissionDenied`.
pub fn map_db_error(e: SqlxError) -> DomainError {
    if matches!(e, SqlxError::PoolTimedOut) {
        return DomainError::StorageTimeout(e.to_string());
    }
    if let Some(code) = e.as_database_error().and_then(|db| db.code()) {
        match code.as_ref() {
            SERIALIZATION_FAILURE | DEADLOCK_DETECTED => {
                return DomainError::WriteConflict(e.to_string());
            }
            INSUFFICIENT_PRIVILEGE => return DomainError::PermissionDenied(e.to_string()),
            _ => {}
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_db_error`], but inside a ledger transaction a unique
/// violation means a concurrent unit won the same key.
pub fn map_tx_error(e: SqlxError) -> DomainError {
    if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
        return DomainError::WriteConflict(e.to_string());
    }
    map_db_error(e)
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
        return on_unique();
    }
    map_db_error(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_retryable() {
        assert!(map_db_error(SqlxError::PoolTimedOut).is_retryable());
        assert!(map_tx_error(SqlxError::PoolTimedOut).is_retryable());
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert!(matches!(err, DomainError::DatabaseError(_)));
        assert!(!err.is_retryable());
    }
}
