//! Domain entities - core business objects

mod user;
mod wink;

pub use user::CurrentUser;
pub use wink::{Wink, WinkDecision, WinkStatus, WinkStatusParseError};
