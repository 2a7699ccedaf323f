//! Acting user identity

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The authenticated user on whose behalf an operation runs
///
/// Session handling lives outside this workspace; callers resolve the session
/// and pass the identity explicitly to every wink operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Snowflake,
}

impl CurrentUser {
    /// Create a new CurrentUser
    pub fn new(id: Snowflake) -> Self {
        Self { id }
    }

    /// Check whether `user_id` refers to this user
    #[inline]
    pub fn is(&self, user_id: Snowflake) -> bool {
        self.id == user_id
    }
}

impl From<Snowflake> for CurrentUser {
    fn from(id: Snowflake) -> Self {
        Self::new(id)
    }
}
