//! Ports implemented by the infrastructure layer

mod clock;
mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use repositories::{RepoResult, WinkQuery, WinkRepository};
