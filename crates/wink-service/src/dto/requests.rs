//! Request DTOs
//!
//! Request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;
use wink_core::traits::WinkQuery;
use wink_core::{Snowflake, WinkStatus};

/// Query parameters for listing received or sent winks
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListWinksRequest {
    /// Only winks in this state
    pub status: Option<WinkStatus>,

    /// Cursor: return winks older than this ID
    pub before: Option<Snowflake>,

    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<i64>,
}

impl From<ListWinksRequest> for WinkQuery {
    fn from(req: ListWinksRequest) -> Self {
        Self {
            status: req.status,
            before: req.before,
            limit: req.limit.unwrap_or(0),
        }
    }
}
