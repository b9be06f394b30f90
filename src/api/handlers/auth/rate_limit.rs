//! Rate limiting for the login endpoint.
//!
//! Counters are in-memory and process-local, so limits are only exact for
//! a single-instance deployment. A window always resets once it elapses;
//! denied attempts never extend it, so a legitimate client can never be
//! locked out permanently.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited,
}

pub trait RateLimiter: Send + Sync {
    fn admit(&self, client_key: &str) -> RateLimitDecision;
}

/// Per-client attempt counter over a fixed window.
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window limiter: at most `limit` attempts per client key per
/// `window`. Shared state is a single coarse mutex; contention is low
/// because the critical section is a map lookup and an increment.
pub struct WindowRateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl WindowRateLimiter {
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn admit_at(&self, client_key: &str, now: Instant) -> RateLimitDecision {
        let Ok(mut windows) = self.windows.lock() else {
            // A poisoned lock means a panic elsewhere; failing open here
            // would be worse than over-counting, so deny.
            return RateLimitDecision::Limited;
        };

        // Drop elapsed windows so abandoned clients do not accumulate.
        let window = self.window;
        windows.retain(|_, entry| now.duration_since(entry.started_at) < window);

        match windows.get_mut(client_key) {
            Some(entry) => {
                if entry.count < self.limit {
                    entry.count += 1;
                    RateLimitDecision::Allowed
                } else {
                    // Denied attempts do not touch the window start, so a
                    // client cannot be retried past the limit early, nor
                    // locked out beyond the window.
                    RateLimitDecision::Limited
                }
            }
            None => {
                windows.insert(
                    client_key.to_string(),
                    Window {
                        started_at: now,
                        count: 1,
                    },
                );
                if self.limit >= 1 {
                    RateLimitDecision::Allowed
                } else {
                    RateLimitDecision::Limited
                }
            }
        }
    }
}

impl RateLimiter for WindowRateLimiter {
    fn admit(&self, client_key: &str) -> RateLimitDecision {
        self.admit_at(client_key, Instant::now())
    }
}

/// Limiter that admits everything; used by tests exercising other paths.
#[derive(Clone, Debug)]
pub struct NoopRateLimiter;

impl RateLimiter for NoopRateLimiter {
    fn admit(&self, _client_key: &str) -> RateLimitDecision {
        RateLimitDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_limit_then_denies() {
        let limiter = WindowRateLimiter::new(5, Duration::from_secs(60));
        let now = Instant::now();
        for _ in 0..5 {
            assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Allowed);
        }
        assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Limited);
        assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Limited);
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = WindowRateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Allowed);
        assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Limited);
        assert_eq!(limiter.admit_at("5.6.7.8", now), RateLimitDecision::Allowed);
    }

    #[test]
    fn window_resets_after_elapse() {
        let limiter = WindowRateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert_eq!(limiter.admit_at("1.2.3.4", start), RateLimitDecision::Allowed);
        assert_eq!(limiter.admit_at("1.2.3.4", start), RateLimitDecision::Allowed);
        assert_eq!(limiter.admit_at("1.2.3.4", start), RateLimitDecision::Limited);

        let later = start + Duration::from_secs(61);
        assert_eq!(limiter.admit_at("1.2.3.4", later), RateLimitDecision::Allowed);
    }

    #[test]
    fn denied_attempts_do_not_extend_the_window() {
        let limiter = WindowRateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert_eq!(limiter.admit_at("1.2.3.4", start), RateLimitDecision::Allowed);

        // Hammering while denied must not push the reset point out.
        for i in 1..=30 {
            let now = start + Duration::from_secs(i);
            assert_eq!(limiter.admit_at("1.2.3.4", now), RateLimitDecision::Limited);
        }
        let after_window = start + Duration::from_secs(61);
        assert_eq!(
            limiter.admit_at("1.2.3.4", after_window),
            RateLimitDecision::Allowed
        );
    }

    #[test]
    fn noop_rate_limiter_allows() {
        let limiter = NoopRateLimiter;
        assert_eq!(limiter.admit("1.2.3.4"), RateLimitDecision::Allowed);
    }
}
