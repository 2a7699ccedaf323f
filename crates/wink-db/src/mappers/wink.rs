//! Wink entity <-> model mapper

use wink_core::entities::{Wink, WinkStatus};
use wink_core::error::DomainError;
use wink_core::value_objects::Snowflake;

use crate::models::WinkModel;

/// Convert WinkModel to Wink entity
///
/// Fails if the row carries a status outside the known set.
impl TryFrom<WinkModel> for Wink {
    type Error = DomainError;

    fn try_from(model: WinkModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<WinkStatus>()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(Wink {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            recipient_id: Snowflake::new(model.recipient_id),
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Wink values bound into an INSERT
pub struct WinkInsert {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub status: &'static str,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl WinkInsert {
    pub fn new(wink: &Wink) -> Self {
        Self {
            id: wink.id.into_inner(),
            sender_id: wink.sender_id.into_inner(),
            recipient_id: wink.recipient_id.into_inner(),
            status: wink.status.as_str(),
            created_at: wink.created_at,
        }
    }

    /// Advisory lock key serializing inserts for one ordered pair
    pub fn pair_lock_key(&self) -> String {
        format!("wink:{}:{}", self.sender_id, self.recipient_id)
    }
}
