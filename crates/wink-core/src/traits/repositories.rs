//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs from the directed relationship
//! store, and the infrastructure layer provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Wink, WinkStatus};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Wink Repository
// ============================================================================

/// Filter and pagination options for wink listings
#[derive(Debug, Clone, Default)]
pub struct WinkQuery {
    /// Only winks with this status
    pub status: Option<WinkStatus>,
    /// Only winks with an ID lower than this one (older)
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl WinkQuery {
    /// Largest page a listing returns
    pub const MAX_LIMIT: i64 = 100;
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Limit clamped to `1..=MAX_LIMIT`, with 0 meaning the default
    pub fn effective_limit(&self) -> i64 {
        if self.limit == 0 {
            Self::DEFAULT_LIMIT
        } else {
            self.limit.clamp(1, Self::MAX_LIMIT)
        }
    }
}

#[async_trait]
pub trait WinkRepository: Send + Sync {
    /// Insert a new wink unless the pair is still blocked
    ///
    /// Check and insert are one atomic step per ordered pair: the insert fails
    /// with `DomainError::WinkConflict` if another wink from the same sender to
    /// the same recipient was created strictly after `cutoff`.
    async fn create(&self, wink: &Wink, cutoff: DateTime<Utc>) -> RepoResult<()>;

    /// Find the most recent wink from `sender_id` to `recipient_id`
    async fn find_latest(
        &self,
        sender_id: Snowflake,
        recipient_id: Snowflake,
    ) -> RepoResult<Option<Wink>>;

    /// Find wink by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Wink>>;

    /// Resolve a pending wink addressed to `recipient_id`
    ///
    /// Returns the updated wink, or `None` when no row matched (unknown ID,
    /// different recipient, or no longer pending).
    async fn update_status(
        &self,
        id: Snowflake,
        recipient_id: Snowflake,
        status: WinkStatus,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Wink>>;

    /// Count winks addressed to a user with the given status
    async fn count_by_recipient(&self, recipient_id: Snowflake, status: WinkStatus) -> RepoResult<i64>;

    /// List winks addressed to a user, newest first
    async fn find_by_recipient(&self, recipient_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>>;

    /// List winks sent by a user, newest first
    async fn find_by_sender(&self, sender_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>>;
}
