//! Entity to model mappers
//!
//! - `TryFrom<WinkModel> for Wink`: convert database rows to domain objects
//! - `WinkInsert`: prepare entity data for database insertion

mod wink;

pub use wink::WinkInsert;
