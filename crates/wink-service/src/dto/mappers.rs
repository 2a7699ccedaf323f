//! Entity to DTO mappers

use chrono::{DateTime, Utc};
use wink_core::{CooldownPolicy, Wink};

use super::responses::{WinkResponse, WinkStatusResponse};

impl From<&Wink> for WinkResponse {
    fn from(wink: &Wink) -> Self {
        Self {
            id: wink.id.to_string(),
            sender_id: wink.sender_id.to_string(),
            recipient_id: wink.recipient_id.to_string(),
            status: wink.status,
            created_at: wink.created_at,
            updated_at: wink.updated_at,
        }
    }
}

impl From<Wink> for WinkResponse {
    fn from(wink: Wink) -> Self {
        Self::from(&wink)
    }
}

impl WinkStatusResponse {
    /// Evaluate the latest wink for a pair against the cooldown at `now`
    pub fn from_latest(latest: Option<&Wink>, policy: &CooldownPolicy, now: DateTime<Utc>) -> Self {
        let Some(wink) = latest else {
            return Self::none();
        };

        Self {
            winked: true,
            status: Some(wink.status),
            can_send_new: policy.can_send(Some(wink), now),
            next_eligible_at: Some(policy.next_eligible_at(wink)),
        }
    }
}
