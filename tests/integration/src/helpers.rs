//! Test helpers for integration tests
//!
//! `TestHarness` wires a `ServiceContext` with a `ManualClock` so scenarios can
//! move time across the cooldown window.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use wink_core::traits::WinkRepository;
use wink_core::{CurrentUser, ManualClock, Snowflake};
use wink_db::{create_pool, run_migrations, DatabaseConfig, InMemoryWinkRepository, PgWinkRepository};
use wink_service::{ServiceContext, WinkService};

use crate::fixtures::{db_now, scenario_start};

/// Service context plus the clock driving it
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    /// Harness over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::with_repo(Arc::new(InMemoryWinkRepository::new()), scenario_start())
    }

    /// Harness over the PostgreSQL database named by `DATABASE_URL`
    pub async fn postgres() -> Result<Self> {
        let config = DatabaseConfig::from_env();
        let pool = create_pool(&config)
            .await
            .context("failed to connect to test database")?;
        run_migrations(&pool).await.context("failed to run migrations")?;

        Ok(Self::with_repo(Arc::new(PgWinkRepository::new(pool)), db_now()))
    }

    fn with_repo(repo: Arc<dyn WinkRepository>, start: DateTime<Utc>) -> Self {
        let clock = Arc::new(ManualClock::new(start));
        let ctx = ServiceContext::builder()
            .wink_repo(repo)
            .clock(clock.clone())
            .build()
            .unwrap_or_else(|e| panic!("failed to build service context: {e}"));
        Self { ctx, clock }
    }

    pub fn service(&self) -> WinkService<'_> {
        WinkService::new(&self.ctx)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.ctx.now()
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Send a wink that is expected to go through and return its ID
    pub async fn send_ok(&self, sender: &CurrentUser, recipient: &CurrentUser) -> Result<Snowflake> {
        let response = self.service().send(sender, recipient.id).await?;
        anyhow::ensure!(response.success, "send refused: {}", response.message);

        let id = response.wink_id.context("successful send without wink_id")?;
        Ok(id.parse()?)
    }
}

/// Check if the database-backed tests can run
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}
