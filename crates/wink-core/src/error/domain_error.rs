//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::WinkStatus;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot wink at yourself")]
    SelfWink,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the recipient can respond to a wink")]
    NotWinkRecipient,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// The store refused an insert because a wink for the pair is still
    /// pending or inside its cooldown window.
    #[error("A wink from {sender_id} to {recipient_id} already exists")]
    WinkConflict {
        sender_id: Snowflake,
        recipient_id: Snowflake,
    },

    #[error("Wink {id} was already {status}")]
    WinkAlreadyResolved { id: Snowflake, status: WinkStatus },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::SelfWink => "SELF_WINK",
            Self::NotWinkRecipient => "NOT_WINK_RECIPIENT",
            Self::WinkConflict { .. } => "WINK_ALREADY_EXISTS",
            Self::WinkAlreadyResolved { .. } => "WINK_ALREADY_RESOLVED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::SelfWink)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotWinkRecipient)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::WinkConflict { .. } | Self::WinkAlreadyResolved { .. }
        )
    }
}
