//! Service layer error types
//!
//! Every wink operation fails with a `ServiceError`. Store failures are wrapped
//! per operation (`Lookup`, `Send`, `Respond`) so callers can tell which step
//! broke without inspecting the store message.

use chrono::{DateTime, Utc};
use std::fmt;
use wink_common::AppError;
use wink_core::{DomainError, Snowflake, WinkStatus};

/// Date format used in user-facing cooldown messages
const ELIGIBLE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Reading from the store failed
    Lookup(String),

    /// Inserting a wink failed
    Send(String),

    /// Updating a wink failed
    Respond(String),

    /// The store refused a duplicate insert for the pair
    Conflict(String),

    /// A wink for the pair is still inside its cooldown window
    Cooldown {
        status: WinkStatus,
        next_eligible_at: DateTime<Utc>,
    },

    /// The wink was resolved before this response arrived
    AlreadyResolved { id: Snowflake, status: WinkStatus },

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Caller may not perform the action
    PermissionDenied { reason: String },

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),

    /// Domain rule violation
    Domain(DomainError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup(msg) => write!(f, "Wink lookup failed: {msg}"),
            Self::Send(msg) => write!(f, "Sending wink failed: {msg}"),
            Self::Respond(msg) => write!(f, "Responding to wink failed: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Cooldown {
                status,
                next_eligible_at,
            } => write!(
                f,
                "Wink already {status}; next wink allowed at {next_eligible_at}"
            ),
            Self::AlreadyResolved { id, status } => write!(f, "Wink {id} was already {status}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { reason } => write!(f, "Permission denied: {reason}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
            Self::Domain(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Wrap a store read failure
    pub fn lookup(err: impl fmt::Display) -> Self {
        Self::Lookup(err.to_string())
    }

    /// Wrap a store insert failure
    pub fn send(err: impl fmt::Display) -> Self {
        Self::Send(err.to_string())
    }

    /// Wrap a store update failure
    pub fn respond(err: impl fmt::Display) -> Self {
        Self::Respond(err.to_string())
    }

    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the failure means "you already winked at this user"
    pub fn is_already_winked(&self) -> bool {
        matches!(self, Self::Cooldown { .. } | Self::Conflict(_))
    }

    /// Get the HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::Validation(_) => 400,
            Self::PermissionDenied { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) | Self::AlreadyResolved { .. } => 409,
            Self::Cooldown { .. } => 429,
            Self::Lookup(_) | Self::Send(_) | Self::Respond(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for callers
    pub fn error_code(&self) -> &str {
        match self {
            Self::Lookup(_) => "LOOKUP_FAILED",
            Self::Send(_) => "SEND_FAILED",
            Self::Respond(_) => "RESPOND_FAILED",
            Self::Conflict(_) => "WINK_ALREADY_EXISTS",
            Self::Cooldown { .. } => "COOLDOWN_ACTIVE",
            Self::AlreadyResolved { .. } => "WINK_ALREADY_RESOLVED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Message safe to show to the acting user
    ///
    /// Store details stay in the logs; only actionable text is returned here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Lookup(_) => "Could not check wink status. Please try again.".to_string(),
            Self::Send(_) => "Could not send wink. Please try again.".to_string(),
            Self::Respond(_) => "Could not update wink. Please try again.".to_string(),
            Self::Conflict(msg) | Self::Validation(msg) => msg.clone(),
            Self::Cooldown {
                status,
                next_eligible_at,
            } => format!(
                "You already winked at this user ({status}). You can wink again after {}.",
                next_eligible_at.format(ELIGIBLE_DATE_FORMAT)
            ),
            Self::AlreadyResolved { status, .. } => format!("This wink was already {status}."),
            Self::NotFound { .. } => "Wink not found.".to_string(),
            Self::PermissionDenied { reason } => reason.clone(),
            Self::Domain(e) if e.is_validation() => e.to_string(),
            Self::Internal(_) | Self::Domain(_) => "Something went wrong.".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Lookup(msg) | ServiceError::Send(msg) | ServiceError::Respond(msg) => {
                AppError::Database(msg)
            }
            ref cooldown @ ServiceError::Cooldown { .. } => AppError::TooEarly(cooldown.user_message()),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ref resolved @ ServiceError::AlreadyResolved { .. } => {
                AppError::Conflict(resolved.to_string())
            }
            ServiceError::NotFound { resource, id } => AppError::NotFound(format!("{resource} {id}")),
            ServiceError::PermissionDenied { .. } => AppError::InsufficientPermissions,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
