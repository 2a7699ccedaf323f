//! Wink database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for winks table
#[derive(Debug, Clone, FromRow)]
pub struct WinkModel {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
