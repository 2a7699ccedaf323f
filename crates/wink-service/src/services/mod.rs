//! Business logic services
//!
//! Service layer for wink interactions: validation, cooldown decisions, and
//! orchestration of store calls.

pub mod context;
pub mod error;
pub mod wink;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use wink::WinkService;
