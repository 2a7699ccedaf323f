//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use wink_core::error::DomainError;
use wink_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a CHECK violation (e.g. sender = recipient) to a validation error
pub fn map_check_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_check_violation() {
            return DomainError::ValidationError(db_err.message().to_string());
        }
    }
    map_db_error(e)
}

/// Create a "wink conflict" error for an ordered pair
pub fn wink_conflict(sender_id: Snowflake, recipient_id: Snowflake) -> DomainError {
    DomainError::WinkConflict {
        sender_id,
        recipient_id,
    }
}
