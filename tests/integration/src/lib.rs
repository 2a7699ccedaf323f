//! Integration test utilities for the wink service
//!
//! This crate provides a harness that drives `WinkService` end to end over
//! either the in-memory store or PostgreSQL, with a clock the tests control.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
