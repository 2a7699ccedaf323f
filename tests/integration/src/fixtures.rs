//! Test fixtures and data generators

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use wink_core::{CurrentUser, SnowflakeGenerator};

/// Worker ID reserved for test data so IDs never collide with real rows
const TEST_WORKER_ID: u16 = 1002;

static IDS: LazyLock<SnowflakeGenerator> = LazyLock::new(|| SnowflakeGenerator::new(TEST_WORKER_ID));

/// A user nobody has interacted with yet
pub fn unique_user() -> CurrentUser {
    CurrentUser::new(IDS.generate())
}

/// Two fresh users
pub fn user_pair() -> (CurrentUser, CurrentUser) {
    (unique_user(), unique_user())
}

/// Fixed starting instant for in-memory scenarios
pub fn scenario_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Current time truncated to microseconds, as PostgreSQL stores it
pub fn db_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}
