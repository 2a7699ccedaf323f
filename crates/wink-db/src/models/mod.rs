//! Database models - SQLx-compatible structs for PostgreSQL tables

mod wink;

pub use wink::WinkModel;
