//! Repository implementations
//!
//! Implementations of the `WinkRepository` port defined in wink-core.

mod error;
mod memory;
mod wink;

pub use memory::InMemoryWinkRepository;
pub use wink::PgWinkRepository;
