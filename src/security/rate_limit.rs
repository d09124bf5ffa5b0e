// Sliding-window rate limiting
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

/// Default maximum requests per window
pub const DEFAULT_MAX_REQUESTS: u32 = 10;

/// Default window length in milliseconds
pub const DEFAULT_WINDOW_MS: i64 = 60_000;

/// Outcome of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request may proceed
    Allowed { remaining: u32 },
    /// The request must wait until the window advances past `reset_at`
    Limited { message: String, reset_at: i64 },
}

impl RateLimitDecision {
    /// Whether the request may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// Remaining budget in the current window, zero when limited
    pub fn remaining(&self) -> u32 {
        match self {
            RateLimitDecision::Allowed { remaining } => *remaining,
            RateLimitDecision::Limited { .. } => 0,
        }
    }
}

/// Sliding-window request counter keyed by caller identifier.
///
/// Each instance owns its state, so embedders and tests can run isolated
/// limiters instead of sharing a process-wide map. The prune-count-append
/// sequence runs under a single lock acquisition: concurrent calls with
/// the same identifier cannot both claim the final slot.
pub struct RateLimiter {
    store: Mutex<HashMap<String, Vec<i64>>>,
}

impl RateLimiter {
    /// Create a new limiter with empty state
    pub fn new() -> Self {
        RateLimiter {
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Check with the default bounds (10 requests per 60 seconds)
    pub fn check_default(&self, identifier: &str) -> RateLimitDecision {
        self.check(identifier, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS)
    }

    /// Check whether `identifier` may issue another request, recording the
    /// request timestamp when allowed
    pub fn check(&self, identifier: &str, max_requests: u32, window_ms: i64) -> RateLimitDecision {
        let now = Utc::now().timestamp_millis();
        let window_start = now - window_ms;

        let mut store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let timestamps = store.entry(identifier.to_string()).or_default();

        // Drop requests that fell out of the window
        timestamps.retain(|&recorded| recorded > window_start);

        if timestamps.len() >= max_requests as usize {
            let reset_at = timestamps.first().copied().unwrap_or(now) + window_ms;

            return RateLimitDecision::Limited {
                message: format!(
                    "Rate limit exceeded. Max {} requests per {} seconds",
                    max_requests,
                    window_ms / 1000
                ),
                reset_at,
            };
        }

        timestamps.push(now);
        let remaining = max_requests - timestamps.len() as u32;

        RateLimitDecision::Allowed { remaining }
    }

    /// Clear all recorded state
    pub fn reset(&self) {
        let mut store = match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        store.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
