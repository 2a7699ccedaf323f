//! Service context - dependency container for services
//!
//! Holds the wink store, the clock, the ID generator and the cooldown policy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use wink_common::{AppConfig, AppError, AppResult};
use wink_core::traits::{Clock, SystemClock, WinkRepository};
use wink_core::{CooldownPolicy, Snowflake, SnowflakeGenerator};
use wink_db::{create_pool, run_migrations, DatabaseConfig, InMemoryWinkRepository, PgWinkRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    wink_repo: Arc<dyn WinkRepository>,
    clock: Arc<dyn Clock>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    cooldown: CooldownPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        wink_repo: Arc<dyn WinkRepository>,
        clock: Arc<dyn Clock>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        cooldown: CooldownPolicy,
    ) -> Self {
        Self {
            wink_repo,
            clock,
            snowflake_generator,
            cooldown,
        }
    }

    /// Connect to PostgreSQL, ensure the schema exists, and wire production defaults
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let pool = create_pool(&DatabaseConfig::from(&config.database))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        info!(
            app = %config.app.name,
            worker_id = config.snowflake.worker_id,
            cooldown_days = config.winks.cooldown_days,
            "Wink service connected"
        );

        Ok(Self::new(
            Arc::new(PgWinkRepository::new(pool)),
            Arc::new(SystemClock),
            Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
            CooldownPolicy::from_days(config.winks.cooldown_days),
        ))
    }

    /// Context backed by a fresh in-memory store and the system clock
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryWinkRepository::new()),
            Arc::new(SystemClock),
            Arc::new(SnowflakeGenerator::default()),
            CooldownPolicy::default(),
        )
    }

    /// Start a builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the wink repository
    pub fn wink_repo(&self) -> &dyn WinkRepository {
        self.wink_repo.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Current time according to the configured clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get the resend cooldown policy
    pub fn cooldown(&self) -> &CooldownPolicy {
        &self.cooldown
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("wink_repo", &"dyn WinkRepository")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("cooldown", &self.cooldown)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Only the repository is required; the clock defaults to `SystemClock`, the
/// generator to worker 0, and the cooldown to seven days.
#[derive(Default)]
pub struct ServiceContextBuilder {
    wink_repo: Option<Arc<dyn WinkRepository>>,
    clock: Option<Arc<dyn Clock>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    cooldown: Option<CooldownPolicy>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wink_repo(mut self, repo: Arc<dyn WinkRepository>) -> Self {
        self.wink_repo = Some(repo);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn cooldown(mut self, cooldown: CooldownPolicy) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.wink_repo
                .ok_or_else(|| ServiceError::validation("wink_repo is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.snowflake_generator.unwrap_or_default(),
            self.cooldown.unwrap_or_default(),
        ))
    }
}
