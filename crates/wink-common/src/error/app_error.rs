//! Application error types
//!
//! Unified error type for embedders of the wink service.

use serde::Serialize;
use std::fmt;
use wink_core::DomainError;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Action refused until a later time (e.g. resend cooldown)
    #[error("Too early: {0}")]
    TooEarly(String),

    // Store errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get the HTTP-equivalent status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InsufficientPermissions => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::TooEarly(_) => 429,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
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
        }
    }

    /// Get error code for responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::TooEarly(_) => "COOLDOWN_ACTIVE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// Create a not found error for a resource
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Serializable error body for callers rendering failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use wink_core::Snowflake;

    const ALL_STATUSES: [u16; 6] = [400, 403, 404, 409, 429, 500];

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InsufficientPermissions.status_code(), 403);
        assert_eq!(AppError::NotFound("wink".to_string()).status_code(), 404);
        assert_eq!(AppError::TooEarly("cooldown".to_string()).status_code(), 429);
        assert_eq!(AppError::Database("down".to_string()).status_code(), 500);

        // no authentication surface, so nothing maps to 401
        let errors = [
            AppError::validation("bad"),
            AppError::InsufficientPermissions,
            AppError::not_found("wink"),
            AppError::Conflict("dup".to_string()),
            AppError::TooEarly("later".to_string()),
            AppError::internal(anyhow::anyhow!("boom")),
        ];
        for (err, expected) in errors.iter().zip(ALL_STATUSES) {
            assert_eq!(err.status_code(), expected);
        }
    }

    #[test]
    fn test_domain_mapping() {
        let err = AppError::from(DomainError::WinkConflict {
            sender_id: Snowflake::new(5),
            recipient_id: Snowflake::new(6),
        });
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "WINK_ALREADY_EXISTS");

        let err = AppError::from(DomainError::NotWinkRecipient);
        assert_eq!(err.status_code(), 403);

        let err = AppError::from(DomainError::SelfWink);
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());

        let err = AppError::from(DomainError::DatabaseError("timeout".to_string()));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_config_error_conversion() {
        let err = AppError::from(ConfigError::MissingVar("DATABASE_URL"));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variable: DATABASE_URL"
        );
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::from(&AppError::not_found("wink 1"))
            .with_details(serde_json::json!({ "wink_id": "1" }));

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found: wink 1");
        assert!(response.details.is_some());
    }
}
