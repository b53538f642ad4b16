//! Rate Limiting Primitives
//!
//! Fixed-size rolling window counters for abuse protection.
//! The counter state itself lives with the caller (usually a database
//! row); this module only provides the window arithmetic.

/// Rate limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed within the window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: i64,
}

impl RateLimitConfig {
    pub const fn new(max_requests: u32, window_secs: i64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }
}

/// Rolling window counter state
///
/// Tracks how many requests occurred since the window opened. When a
/// request arrives after the window has elapsed, the window resets and
/// counting starts over from that request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCounter {
    /// Unix timestamp (seconds) when the current window opened
    pub window_started_at: i64,
    /// Requests counted in the current window
    pub count: u32,
}

impl WindowCounter {
    /// Start a fresh window at `now` with zero requests counted
    pub fn start(now: i64) -> Self {
        Self {
            window_started_at: now,
            count: 0,
        }
    }

    /// Whether the window that opened at `window_started_at` has elapsed
    ///
    /// The window covers its full length: it is only considered elapsed
    /// once strictly more than `window_secs` have passed.
    pub fn is_expired(&self, config: &RateLimitConfig, now: i64) -> bool {
        now - self.window_started_at > config.window_secs
    }

    /// Whether another request is allowed at `now`
    ///
    /// An expired window always allows the request (it will reset on
    /// record). Within a live window, requests are allowed until
    /// `max_requests` have been counted.
    pub fn allows(&self, config: &RateLimitConfig, now: i64) -> bool {
        if self.is_expired(config, now) {
            return true;
        }
        self.count < config.max_requests
    }

    /// Count a request at `now`, resetting the window first if expired
    pub fn record(&mut self, config: &RateLimitConfig, now: i64) {
        if self.is_expired(config, now) {
            self.window_started_at = now;
            self.count = 0;
        }
        self.count += 1;
    }

    /// Seconds until a request is allowed again (0 when the window has
    /// already elapsed)
    pub fn retry_after_secs(&self, config: &RateLimitConfig, now: i64) -> i64 {
        (self.window_started_at + config.window_secs + 1 - now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: RateLimitConfig = RateLimitConfig::new(6, 3600);

    #[test]
    fn test_allows_up_to_limit() {
        let mut counter = WindowCounter::start(1000);
        for _ in 0..6 {
            assert!(counter.allows(&CONFIG, 1000));
            counter.record(&CONFIG, 1000);
        }
        assert!(!counter.allows(&CONFIG, 1000));
    }

    #[test]
    fn test_window_reset_allows_again() {
        let mut counter = WindowCounter::start(1000);
        for _ in 0..6 {
            counter.record(&CONFIG, 1000);
        }
        assert!(!counter.allows(&CONFIG, 1000 + 3599));
        // The window covers the boundary second itself
        assert!(!counter.allows(&CONFIG, 1000 + 3600));
        assert!(counter.allows(&CONFIG, 1000 + 3601));

        counter.record(&CONFIG, 1000 + 3601);
        assert_eq!(counter.count, 1);
        assert_eq!(counter.window_started_at, 1000 + 3601);
    }

    #[test]
    fn test_retry_after() {
        let mut counter = WindowCounter::start(1000);
        counter.record(&CONFIG, 1000);
        assert_eq!(counter.retry_after_secs(&CONFIG, 1000), 3601);
        assert_eq!(counter.retry_after_secs(&CONFIG, 2800), 1801);
        assert_eq!(counter.retry_after_secs(&CONFIG, 10_000), 0);
    }

    #[test]
    fn test_record_mid_window_keeps_start() {
        let mut counter = WindowCounter::start(1000);
        counter.record(&CONFIG, 1000);
        counter.record(&CONFIG, 2000);
        assert_eq!(counter.window_started_at, 1000);
        assert_eq!(counter.count, 2);
    }
}
