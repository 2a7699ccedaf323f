//! Resend cooldown
//!
//! Once a wink exists for an ordered pair, the sender may not wink at the same
//! recipient again until the window has elapsed from the latest wink's
//! `created_at`. The prior wink's status does not matter.

use chrono::{DateTime, Duration, Utc};

use crate::entities::Wink;

/// Cooldown policy for resending winks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    window: Duration,
}

impl CooldownPolicy {
    /// Default window length in days
    pub const DEFAULT_DAYS: i64 = 7;

    /// Create a policy with a custom window
    ///
    /// Negative windows are treated as zero (no cooldown).
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.max(Duration::zero()),
        }
    }

    /// Create a policy with a window of `days` days
    ///
    /// Values beyond `Duration`'s range saturate to `Duration::MAX`.
    pub fn from_days(days: i64) -> Self {
        Self::new(Duration::try_days(days).unwrap_or(Duration::MAX))
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Earliest time a new wink may follow `latest`
    ///
    /// Saturates at `DateTime::<Utc>::MAX_UTC`.
    pub fn next_eligible_at(&self, latest: &Wink) -> DateTime<Utc> {
        latest
            .created_at
            .checked_add_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether a new wink may be sent at `now`, given the latest wink for the pair
    ///
    /// The boundary is inclusive: sending exactly at `created_at + window` is allowed.
    pub fn can_send(&self, latest: Option<&Wink>, now: DateTime<Utc>) -> bool {
        latest.is_none_or(|wink| now >= self.next_eligible_at(wink))
    }

    /// Winks created strictly after this instant still block a send at `now`
    ///
    /// Saturates at `DateTime::<Utc>::MIN_UTC`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::from_days(Self::DEFAULT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{WinkDecision, WinkStatus};
    use crate::value_objects::Snowflake;
    use chrono::TimeZone;

    fn wink_at(created_at: DateTime<Utc>) -> Wink {
        Wink::new(Snowflake::new(1), Snowflake::new(10), Snowflake::new(20), created_at).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_window_is_seven_days() {
        assert_eq!(CooldownPolicy::default().window(), Duration::days(7));
    }

    #[test]
    fn test_no_prior_wink_can_send() {
        assert!(CooldownPolicy::default().can_send(None, t0()));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let policy = CooldownPolicy::default();
        let wink = wink_at(t0());
        let eligible = t0() + Duration::days(7);

        assert_eq!(policy.next_eligible_at(&wink), eligible);
        assert!(policy.can_send(Some(&wink), eligible));
        assert!(!policy.can_send(Some(&wink), eligible - Duration::seconds(1)));
        assert!(policy.can_send(Some(&wink), eligible + Duration::seconds(1)));
    }

    #[test]
    fn test_status_does_not_shorten_cooldown() {
        let policy = CooldownPolicy::default();
        let mut wink = wink_at(t0());
        wink.resolve(WinkDecision::Rejected, t0() + Duration::hours(1)).unwrap();
        assert_eq!(wink.status, WinkStatus::Rejected);

        assert!(!policy.can_send(Some(&wink), t0() + Duration::days(5)));
    }

    #[test]
    fn test_cutoff_matches_can_send() {
        let policy = CooldownPolicy::default();
        let now = t0() + Duration::days(7);
        let cutoff = policy.cutoff(now);

        // created exactly at the cutoff no longer blocks
        assert_eq!(cutoff, t0());
        assert!(policy.can_send(Some(&wink_at(cutoff)), now));
        assert!(!policy.can_send(Some(&wink_at(cutoff + Duration::milliseconds(1))), now));
    }

    #[test]
    fn test_huge_window_saturates() {
        let policy = CooldownPolicy::from_days(100_000_000);
        let wink = wink_at(t0());

        assert_eq!(policy.next_eligible_at(&wink), DateTime::<Utc>::MAX_UTC);
        assert_eq!(policy.cutoff(t0()), DateTime::<Utc>::MIN_UTC);
        assert!(!policy.can_send(Some(&wink), t0() + Duration::days(365 * 100)));

        let unbounded = CooldownPolicy::from_days(i64::MAX);
        assert_eq!(unbounded.window(), Duration::MAX);
        assert_eq!(unbounded.cutoff(t0()), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_negative_window_clamped() {
        let policy = CooldownPolicy::new(Duration::days(-3));
        assert_eq!(policy.window(), Duration::zero());
        assert!(policy.can_send(Some(&wink_at(t0())), t0()));
    }
}
