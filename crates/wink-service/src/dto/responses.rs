//! Response DTOs
//!
//! All response DTOs implement `Serialize`.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wink_core::WinkStatus;

/// Relationship state from the current user to another user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinkStatusResponse {
    /// Whether any wink was ever sent to this user
    pub winked: bool,
    /// Status of the latest wink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WinkStatus>,
    /// Whether the cooldown allows sending a new wink now
    pub can_send_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_eligible_at: Option<DateTime<Utc>>,
}

impl WinkStatusResponse {
    /// No wink has been sent yet
    pub fn none() -> Self {
        Self {
            winked: false,
            status: None,
            can_send_new: true,
            next_eligible_at: None,
        }
    }
}

/// Outcome of a send attempt
///
/// A refused send (cooldown) is a normal outcome with `success = false`,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendWinkResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wink_id: Option<String>,
}

impl SendWinkResponse {
    pub fn sent(wink_id: impl ToString) -> Self {
        Self {
            success: true,
            message: "Wink sent".to_string(),
            wink_id: Some(wink_id.to_string()),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            wink_id: None,
        }
    }
}

/// Wink response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinkResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub status: WinkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
