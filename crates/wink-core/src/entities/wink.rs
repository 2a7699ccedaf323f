//! Wink entity - a directed interest signal from one user to another
//!
//! Lifecycle:
//! ```text
//! [none] --send--> Pending --respond(Accepted)--> Accepted
//!                  Pending --respond(Rejected)--> Rejected
//! ```
//! Accepted and Rejected are terminal; nothing returns to Pending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Outcome state of a wink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WinkStatus {
    /// Sent, waiting for the recipient
    #[default]
    Pending,
    /// Recipient accepted
    Accepted,
    /// Recipient rejected
    Rejected,
}

impl WinkStatus {
    /// Storage/display representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Accepted and Rejected never change again
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for WinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a stored status string is not a known wink status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wink status: {0}")]
pub struct WinkStatusParseError(pub String);

impl FromStr for WinkStatus {
    type Err = WinkStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(WinkStatusParseError(other.to_string())),
        }
    }
}

/// Recipient's answer to a pending wink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinkDecision {
    Accepted,
    Rejected,
}

impl From<WinkDecision> for WinkStatus {
    fn from(decision: WinkDecision) -> Self {
        match decision {
            WinkDecision::Accepted => Self::Accepted,
            WinkDecision::Rejected => Self::Rejected,
        }
    }
}

/// Wink entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wink {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub recipient_id: Snowflake,
    pub status: WinkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wink {
    /// Create a new pending wink sent at `now`
    ///
    /// Fails with `SelfWink` when sender and recipient are the same user, and
    /// with `ValidationError` when either ID is zero.
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if sender_id.is_zero() || recipient_id.is_zero() {
            return Err(DomainError::ValidationError(
                "sender and recipient IDs are required".to_string(),
            ));
        }
        if sender_id == recipient_id {
            return Err(DomainError::SelfWink);
        }

        Ok(Self {
            id,
            sender_id,
            recipient_id,
            status: WinkStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply the recipient's decision
    ///
    /// Only a pending wink can be resolved, and only once.
    pub fn resolve(&mut self, decision: WinkDecision, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::WinkAlreadyResolved {
                id: self.id,
                status: self.status,
            });
        }
        self.status = decision.into();
        self.updated_at = now;
        Ok(())
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Check if the user is the sender or the recipient
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// Check if this wink goes from `sender_id` to `recipient_id`
    #[inline]
    pub fn is_between(&self, sender_id: Snowflake, recipient_id: Snowflake) -> bool {
        self.sender_id == sender_id && self.recipient_id == recipient_id
    }
}
