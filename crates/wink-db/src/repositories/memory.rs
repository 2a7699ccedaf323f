//! In-memory implementation of WinkRepository
//!
//! Keeps winks in `DashMap`s. The pair index entry is held for the whole
//! check-and-insert in `create`, which gives the same per-pair atomicity as
//! the advisory lock in the PostgreSQL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, instrument};

use wink_core::entities::{Wink, WinkStatus};
use wink_core::traits::{RepoResult, WinkQuery, WinkRepository};
use wink_core::value_objects::Snowflake;

use super::error::wink_conflict;

type Pair = (Snowflake, Snowflake);

/// Process-local wink store
#[derive(Debug, Default)]
pub struct InMemoryWinkRepository {
    winks: DashMap<Snowflake, Wink>,
    /// (sender, recipient) -> wink IDs in insertion order
    pairs: DashMap<Pair, Vec<Snowflake>>,
}

impl InMemoryWinkRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored winks
    pub fn len(&self) -> usize {
        self.winks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winks.is_empty()
    }

    fn list<F>(&self, query: &WinkQuery, filter: F) -> Vec<Wink>
    where
        F: Fn(&Wink) -> bool,
    {
        let mut winks: Vec<Wink> = self
            .winks
            .iter()
            .filter(|entry| {
                let wink = entry.value();
                filter(wink)
                    && query.status.is_none_or(|status| wink.status == status)
                    && query.before.is_none_or(|before| wink.id < before)
            })
            .map(|entry| entry.value().clone())
            .collect();

        winks.sort_unstable_by(|a, b| b.id.cmp(&a.id));
        winks.truncate(usize::try_from(query.effective_limit()).unwrap_or(0));
        winks
    }
}

#[async_trait]
impl WinkRepository for InMemoryWinkRepository {
    #[instrument(skip(self, wink), fields(wink_id = %wink.id))]
    async fn create(&self, wink: &Wink, cutoff: DateTime<Utc>) -> RepoResult<()> {
        if wink.sender_id == wink.recipient_id {
            return Err(wink_core::DomainError::SelfWink);
        }

        // Entry guard locks this pair's shard until the insert is done
        let mut ids = self
            .pairs
            .entry((wink.sender_id, wink.recipient_id))
            .or_default();

        let blocked = ids.iter().any(|id| {
            self.winks
                .get(id)
                .is_some_and(|existing| existing.created_at > cutoff)
        });
        if blocked {
            debug!("Wink insert blocked by cooldown");
            return Err(wink_conflict(wink.sender_id, wink.recipient_id));
        }

        if self.winks.contains_key(&wink.id) {
            return Err(wink_core::DomainError::DatabaseError(format!(
                "duplicate wink id {}",
                wink.id
            )));
        }

        self.winks.insert(wink.id, wink.clone());
        ids.push(wink.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_latest(
        &self,
        sender_id: Snowflake,
        recipient_id: Snowflake,
    ) -> RepoResult<Option<Wink>> {
        let Some(ids) = self.pairs.get(&(sender_id, recipient_id)) else {
            return Ok(None);
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.winks.get(id).map(|w| w.value().clone()))
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id))))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Wink>> {
        Ok(self.winks.get(&id).map(|w| w.value().clone()))
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Snowflake,
        recipient_id: Snowflake,
        status: WinkStatus,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Wink>> {
        let Some(mut wink) = self.winks.get_mut(&id) else {
            return Ok(None);
        };

        if wink.recipient_id != recipient_id || !wink.is_pending() {
            return Ok(None);
        }

        wink.status = status;
        wink.updated_at = updated_at;
        Ok(Some(wink.clone()))
    }

    #[instrument(skip(self))]
    async fn count_by_recipient(&self, recipient_id: Snowflake, status: WinkStatus) -> RepoResult<i64> {
        let count = self
            .winks
            .iter()
            .filter(|w| w.recipient_id == recipient_id && w.status == status)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(&self, recipient_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>> {
        Ok(self.list(&query, |w| w.recipient_id == recipient_id))
    }

    #[instrument(skip(self))]
    async fn find_by_sender(&self, sender_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>> {
        Ok(self.list(&query, |w| w.sender_id == sender_id))
    }
}
