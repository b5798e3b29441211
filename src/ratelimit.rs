//! Sliding-window admission per client.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

type Window = Arc<Mutex<VecDeque<Instant>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the oldest recorded request leaves the window.
    pub reset_in: Duration,
}

#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&self, client: &str, max_requests: u32, window: Duration) -> RateDecision {
        self.admit_at(client, max_requests, window, Instant::now())
    }

    /// Same as [`admit`](Self::admit) with an explicit clock reading.
    pub fn admit_at(
        &self,
        client: &str,
        max_requests: u32,
        window: Duration,
        now: Instant,
    ) -> RateDecision {
        let entry = self.window(client);
        let mut requests = entry.lock();

        while let Some(oldest) = requests.front() {
            if now.saturating_duration_since(*oldest) > window {
                requests.pop_front();
            } else {
                break;
            }
        }

        let count = u32::try_from(requests.len()).unwrap_or(u32::MAX);
        if count >= max_requests {
            debug!(client, limit = max_requests, "rate limit exceeded");
            return RateDecision {
                allowed: false,
                limit: max_requests,
                remaining: 0,
                reset_in: reset_in(&requests, window, now),
            };
        }

        requests.push_back(now);
        RateDecision {
            allowed: true,
            limit: max_requests,
            remaining: max_requests - (count + 1),
            reset_in: reset_in(&requests, window, now),
        }
    }

    /// Drops a client's history. Returns whether it was tracked.
    pub fn forget(&self, client: &str) -> bool {
        self.windows.lock().remove(client).is_some()
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }

    fn window(&self, client: &str) -> Window {
        let mut windows = self.windows.lock();
        Arc::clone(windows.entry(client.to_string()).or_default())
    }
}

fn reset_in(requests: &VecDeque<Instant>, window: Duration, now: Instant) -> Duration {
    requests
        .front()
        .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn fourth_call_denied_then_readmitted() {
        let limiter = RateLimiter::new();
        let start = Instant::now();

        let remaining: Vec<u32> = (0..3)
            .map(|i| {
                let decision =
                    limiter.admit_at("10.0.0.1", 3, WINDOW, start + Duration::from_secs(i));
                assert!(decision.allowed);
                decision.remaining
            })
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let denied = limiter.admit_at("10.0.0.1", 3, WINDOW, start + Duration::from_secs(10));
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.limit, 3);
        assert_eq!(denied.reset_in, Duration::from_secs(50));

        let later = limiter.admit_at("10.0.0.1", 3, WINDOW, start + Duration::from_millis(60_001));
        assert!(later.allowed);
        assert_eq!(later.remaining, 0);
    }

    #[test]
    fn denied_calls_are_not_recorded() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        limiter.admit_at("c", 1, WINDOW, start);
        for i in 1..5 {
            assert!(!limiter.admit_at("c", 1, WINDOW, start + Duration::from_secs(i)).allowed);
        }
        assert!(limiter.admit_at("c", 1, WINDOW, start + Duration::from_secs(61)).allowed);
    }

    #[test]
    fn clients_are_independent() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        assert!(limiter.admit_at("a", 1, WINDOW, now).allowed);
        assert!(limiter.admit_at("b", 1, WINDOW, now).allowed);
        assert!(!limiter.admit_at("a", 1, WINDOW, now).allowed);
        assert_eq!(limiter.tracked_clients(), 2);

        assert!(limiter.forget("a"));
        assert!(!limiter.forget("a"));
        assert!(limiter.admit_at("a", 1, WINDOW, now).allowed);
    }

    #[test]
    fn parallel_clients() {
        let limiter = Arc::new(RateLimiter::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    let client = format!("client-{}", n % 2);
                    (0..50)
                        .filter(|_| limiter.admit(&client, 100, WINDOW).allowed)
                        .count()
                })
            })
            .collect();
        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 200);
    }

    proptest! {
        #[test]
        fn never_more_than_max_inside_a_window(
            max in 1u32..6,
            gaps in proptest::collection::vec(0u64..30_000, 1..40),
        ) {
            let limiter = RateLimiter::new();
            let mut now = Instant::now();
            let mut admitted: Vec<Instant> = Vec::new();
            for gap in gaps {
                now += Duration::from_millis(gap);
                let decision = limiter.admit_at("p", max, WINDOW, now);
                prop_assert!(decision.remaining < max || !decision.allowed);
                if decision.allowed {
                    admitted.push(now);
                }
                let recent = admitted
                    .iter()
                    .filter(|t| now.saturating_duration_since(**t) <= WINDOW)
                    .count();
                prop_assert!(recent as u32 <= max);
            }
        }
    }
}
