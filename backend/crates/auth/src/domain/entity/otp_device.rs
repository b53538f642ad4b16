//! OTP Device Entity
//!
//! One per user. Holds the TOTP secret plus the dispatch and lockout
//! counters. All time-dependent operations take `now` so the rolling
//! window and lockout arithmetic stay testable.

use chrono::{DateTime, Duration, Utc};
use platform::rate_limit::{RateLimitConfig, WindowCounter};

use crate::domain::value_object::{totp_secret::TotpSecret, user_id::UserId};

/// OTP device entity
///
/// Counter races between concurrent requests for the same user are
/// tolerated (last writer wins); these are abuse heuristics, not
/// security-critical counters.
#[derive(Debug, Clone)]
pub struct OtpDevice {
    /// Owning user (unique, at most one device per user)
    pub user_id: UserId,
    /// Shared secret, generated once and never rotated
    pub secret: TotpSecret,
    /// Most recent code dispatch, if any
    pub last_sent_at: Option<DateTime<Utc>>,
    /// Codes dispatched in the current rolling window
    pub send_count_hour: u32,
    /// Start of the current counting window
    pub last_send_count_reset: Option<DateTime<Utc>>,
    /// Consecutive verification failures since last success
    pub failed_attempts: u16,
    /// Verification refused until this instant, if set
    pub locked_until: Option<DateTime<Utc>>,
    /// Created timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl OtpDevice {
    /// Failed code attempts tolerated before lockout
    pub const MAX_CODE_FAILURES: u16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    /// Provision a fresh device with a newly generated secret
    pub fn provision(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            secret: TotpSecret::generate(),
            last_sent_at: None,
            send_count_hour: 0,
            last_send_count_reset: None,
            failed_attempts: 0,
            locked_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn window_counter(&self) -> Option<WindowCounter> {
        self.last_send_count_reset.map(|reset| WindowCounter {
            window_started_at: reset.timestamp(),
            count: self.send_count_hour,
        })
    }

    /// Whether another code may be dispatched at `now`
    pub fn may_dispatch(&self, limit: &RateLimitConfig, now: DateTime<Utc>) -> bool {
        match self.window_counter() {
            Some(counter) => counter.allows(limit, now.timestamp()),
            None => true,
        }
    }

    /// Seconds until the dispatch window resets (0 when dispatch is
    /// already allowed)
    pub fn dispatch_retry_after_secs(&self, limit: &RateLimitConfig, now: DateTime<Utc>) -> i64 {
        match self.window_counter() {
            Some(counter) if !counter.allows(limit, now.timestamp()) => {
                counter.retry_after_secs(limit, now.timestamp())
            }
            _ => 0,
        }
    }

    /// Count a dispatch at `now`, opening a fresh window if the old one
    /// has elapsed
    pub fn record_dispatch(&mut self, limit: &RateLimitConfig, now: DateTime<Utc>) {
        let mut counter = self
            .window_counter()
            .unwrap_or_else(|| WindowCounter::start(now.timestamp()));
        counter.record(limit, now.timestamp());

        self.send_count_hour = counter.count;
        self.last_send_count_reset =
            Some(DateTime::from_timestamp(counter.window_started_at, 0).unwrap_or(now));
        self.last_sent_at = Some(now);
        self.updated_at = now;
    }

    /// Whether verification is currently refused
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }

    /// Count a failed verification; locks the device once the threshold
    /// is reached
    pub fn record_failure(&mut self, now: DateTime<Utc>) {
        self.failed_attempts += 1;
        self.updated_at = now;

        if self.failed_attempts >= Self::MAX_CODE_FAILURES {
            self.locked_until = Some(now + Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    /// Clear failure count and lockout after a successful verification
    pub fn record_success(&mut self, now: DateTime<Utc>) {
        self.failed_attempts = 0;
        self.locked_until = None;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: RateLimitConfig = RateLimitConfig::new(6, 3600);

    fn device() -> OtpDevice {
        OtpDevice::provision(UserId::new(), Utc::now())
    }

    #[test]
    fn test_fresh_device_may_dispatch() {
        let device = device();
        assert!(device.may_dispatch(&LIMIT, Utc::now()));
        assert_eq!(device.send_count_hour, 0);
        assert!(device.last_sent_at.is_none());
    }

    #[test]
    fn test_seventh_dispatch_refused() {
        let mut device = device();
        let now = Utc::now();

        for _ in 0..6 {
            assert!(device.may_dispatch(&LIMIT, now));
            device.record_dispatch(&LIMIT, now);
        }
        assert_eq!(device.send_count_hour, 6);
        assert!(!device.may_dispatch(&LIMIT, now));
    }

    #[test]
    fn test_retry_after_counts_down() {
        let mut device = device();
        let now = Utc::now();

        assert_eq!(device.dispatch_retry_after_secs(&LIMIT, now), 0);

        for _ in 0..6 {
            device.record_dispatch(&LIMIT, now);
        }
        assert_eq!(device.dispatch_retry_after_secs(&LIMIT, now), 3601);

        let later = now + Duration::seconds(1200);
        assert_eq!(device.dispatch_retry_after_secs(&LIMIT, later), 2401);

        let expired = now + Duration::seconds(3601);
        assert_eq!(device.dispatch_retry_after_secs(&LIMIT, expired), 0);
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let mut device = device();
        let now = Utc::now();

        for _ in 0..6 {
            device.record_dispatch(&LIMIT, now);
        }

        // Still refused at exactly one hour; the window covers its
        // boundary second
        assert!(!device.may_dispatch(&LIMIT, now + Duration::seconds(3600)));

        let later = now + Duration::seconds(3601);
        assert!(device.may_dispatch(&LIMIT, later));

        device.record_dispatch(&LIMIT, later);
        assert_eq!(device.send_count_hour, 1);
        assert_eq!(
            device.last_send_count_reset.unwrap().timestamp(),
            later.timestamp()
        );
    }

    #[test]
    fn test_lockout_after_five_failures() {
        let mut device = device();
        let now = Utc::now();

        for _ in 0..4 {
            device.record_failure(now);
            assert!(!device.is_locked(now));
        }

        device.record_failure(now);
        assert_eq!(device.failed_attempts, 5);
        assert!(device.is_locked(now));
        assert_eq!(
            device.locked_until.unwrap(),
            now + Duration::minutes(OtpDevice::LOCKOUT_MINUTES)
        );
    }

    #[test]
    fn test_lockout_expires() {
        let mut device = device();
        let now = Utc::now();

        for _ in 0..5 {
            device.record_failure(now);
        }

        let after = now + Duration::minutes(OtpDevice::LOCKOUT_MINUTES) + Duration::seconds(1);
        assert!(!device.is_locked(after));
    }

    #[test]
    fn test_success_clears_failures_and_lock() {
        let mut device = device();
        let now = Utc::now();

        for _ in 0..5 {
            device.record_failure(now);
        }
        assert!(device.is_locked(now));

        device.record_success(now);
        assert_eq!(device.failed_attempts, 0);
        assert!(device.locked_until.is_none());
        assert!(!device.is_locked(now));
    }
}
