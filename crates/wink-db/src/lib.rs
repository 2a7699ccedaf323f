//! # wink-db
//!
//! Storage layer implementing `WinkRepository`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations (PostgreSQL via SQLx)
//! - Database row models with SQLx `FromRow` derives
//! - Row ↔ entity mappers
//! - `PgWinkRepository`, the production store
//! - `InMemoryWinkRepository`, a process-local store with the same guarantees
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wink_db::{create_pool, run_migrations, DatabaseConfig, PgWinkRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let wink_repo = PgWinkRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{InMemoryWinkRepository, PgWinkRepository};
