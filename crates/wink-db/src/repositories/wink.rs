//! PostgreSQL implementation of WinkRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use wink_core::entities::{Wink, WinkStatus};
use wink_core::traits::{RepoResult, WinkQuery, WinkRepository};
use wink_core::value_objects::Snowflake;

use crate::mappers::WinkInsert;
use crate::models::WinkModel;

use super::error::{map_check_violation, map_db_error, wink_conflict};

/// PostgreSQL implementation of WinkRepository
#[derive(Clone)]
pub struct PgWinkRepository {
    pool: PgPool,
}

impl PgWinkRepository {
    /// Create a new PgWinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_party(
        &self,
        column: Party,
        user_id: Snowflake,
        query: WinkQuery,
    ) -> RepoResult<Vec<Wink>> {
        let sql = match column {
            Party::Sender => {
                r#"
                SELECT id, sender_id, recipient_id, status, created_at, updated_at
                FROM winks
                WHERE sender_id = $1
                  AND ($2::TEXT IS NULL OR status = $2)
                  AND ($3::BIGINT IS NULL OR id < $3)
                ORDER BY id DESC
                LIMIT $4
                "#
            }
            Party::Recipient => {
                r#"
                SELECT id, sender_id, recipient_id, status, created_at, updated_at
                FROM winks
                WHERE recipient_id = $1
                  AND ($2::TEXT IS NULL OR status = $2)
                  AND ($3::BIGINT IS NULL OR id < $3)
                ORDER BY id DESC
                LIMIT $4
                "#
            }
        };

        let results = sqlx::query_as::<_, WinkModel>(sql)
            .bind(user_id.into_inner())
            .bind(query.status.map(WinkStatus::as_str))
            .bind(query.before.map(Snowflake::into_inner))
            .bind(query.effective_limit())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Wink::try_from).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Party {
    Sender,
    Recipient,
}

#[async_trait]
impl WinkRepository for PgWinkRepository {
    #[instrument(skip(self, wink), fields(wink_id = %wink.id))]
    async fn create(&self, wink: &Wink, cutoff: DateTime<Utc>) -> RepoResult<()> {
        let insert = WinkInsert::new(wink);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes concurrent sends for the same ordered pair until commit,
        // so the NOT EXISTS check below cannot be raced.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(insert.pair_lock_key())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            INSERT INTO winks (id, sender_id, recipient_id, status, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $5
            WHERE NOT EXISTS (
                SELECT 1 FROM winks
                WHERE sender_id = $2 AND recipient_id = $3 AND created_at > $6
            )
            "#,
        )
        .bind(insert.id)
        .bind(insert.sender_id)
        .bind(insert.recipient_id)
        .bind(insert.status)
        .bind(insert.created_at)
        .bind(cutoff)
        .execute(&mut *tx)
        .await
        .map_err(map_check_violation)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back and releases the lock
            debug!("Wink insert blocked by cooldown");
            return Err(wink_conflict(wink.sender_id, wink.recipient_id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_latest(
        &self,
        sender_id: Snowflake,
        recipient_id: Snowflake,
    ) -> RepoResult<Option<Wink>> {
        let result = sqlx::query_as::<_, WinkModel>(
            r#"
            SELECT id, sender_id, recipient_id, status, created_at, updated_at
            FROM winks
            WHERE sender_id = $1 AND recipient_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(sender_id.into_inner())
        .bind(recipient_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Wink::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Wink>> {
        let result = sqlx::query_as::<_, WinkModel>(
            r#"
            SELECT id, sender_id, recipient_id, status, created_at, updated_at
            FROM winks
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Wink::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Snowflake,
        recipient_id: Snowflake,
        status: WinkStatus,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<Option<Wink>> {
        let result = sqlx::query_as::<_, WinkModel>(
            r#"
            UPDATE winks
            SET status = $3, updated_at = $4
            WHERE id = $1 AND recipient_id = $2 AND status = 'pending'
            RETURNING id, sender_id, recipient_id, status, created_at, updated_at
            "#,
        )
        .bind(id.into_inner())
        .bind(recipient_id.into_inner())
        .bind(status.as_str())
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Wink::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn count_by_recipient(&self, recipient_id: Snowflake, status: WinkStatus) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM winks WHERE recipient_id = $1 AND status = $2
            "#,
        )
        .bind(recipient_id.into_inner())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(&self, recipient_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>> {
        self.find_by_party(Party::Recipient, recipient_id, query).await
    }

    #[instrument(skip(self))]
    async fn find_by_sender(&self, sender_id: Snowflake, query: WinkQuery) -> RepoResult<Vec<Wink>> {
        self.find_by_party(Party::Sender, sender_id, query).await
    }
}
