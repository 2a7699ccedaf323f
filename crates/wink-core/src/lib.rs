//! # wink-core
//!
//! Domain layer for wink interactions: the `Wink` entity and its state machine,
//! the resend cooldown policy, and the ports (repository, clock) that the
//! infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, runtime, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{CurrentUser, Wink, WinkDecision, WinkStatus, WinkStatusParseError};
pub use error::DomainError;
pub use policy::CooldownPolicy;
pub use traits::{Clock, ManualClock, RepoResult, SystemClock, WinkQuery, WinkRepository};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
