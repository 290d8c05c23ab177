// ============================
// crates/backend-lib/src/rate_limit.rs
// ============================
//! In-memory fixed-window rate limiting.
//!
//! One counter per identifier, reset at fixed boundaries rather than sliding:
//! a client that bursts `max_requests` at the very end of one window can burst
//! again at the start of the next. That imprecision is accepted behavior.
//! Counters live only in this process; horizontally scaled deployments get
//! independent budgets per instance.

use dashmap::DashMap;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::metrics::RATE_LIMIT_DENIED;
use crate::unix_millis;

/// Limits applied to one class of action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateLimitSettings {
    /// Requests admitted per identifier per window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_secs: 3600,
        }
    }
}

impl RateLimitSettings {
    /// Stricter defaults for login attempts.
    pub fn login_default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 900,
        }
    }
}

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the window after this call
    pub remaining: u32,
    /// Epoch milliseconds at which the window ends
    pub reset_at_millis: u64,
}

/// One identifier's counter. `count` is the count at the last successful
/// consume; the admission decision, not the stored value, enforces the
/// ceiling.
#[derive(Debug, Clone)]
struct WindowEntry {
    count: u32,
    reset_at_millis: u64,
}

/// Fixed-window counter keyed by an arbitrary identifier string.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, WindowEntry>>,
    max_requests: u32,
    window_millis: u64,
}

impl RateLimiter {
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests: settings.max_requests,
            window_millis: settings.window_secs * 1000,
        }
    }

    /// Admit or deny one action for `key`, consuming budget on admit.
    pub fn check_and_consume(&self, key: &str) -> RateLimitDecision {
        self.check_and_consume_at(key, unix_millis())
    }

    /// Admission against an explicit clock, split out so window behavior is
    /// testable without sleeping.
    ///
    /// The entry is mutated under its map shard lock, so the whole
    /// read-modify-write is atomic per key. Two calls racing across a window
    /// boundary can still each observe "elapsed" and reset in turn, admitting
    /// at worst one extra request per identifier per boundary.
    pub fn check_and_consume_at(&self, key: &str, now_millis: u64) -> RateLimitDecision {
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(WindowEntry {
                count: 0,
                reset_at_millis: 0,
            });

        // A fresh insert carries reset_at_millis = 0, so "no entry" and
        // "window elapsed" share this branch.
        if entry.reset_at_millis <= now_millis {
            entry.count = 1;
            entry.reset_at_millis = now_millis + self.window_millis;
            return RateLimitDecision {
                allowed: true,
                remaining: self.max_requests.saturating_sub(1),
                reset_at_millis: entry.reset_at_millis,
            };
        }

        if entry.count >= self.max_requests {
            counter!(RATE_LIMIT_DENIED).increment(1);
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at_millis: entry.reset_at_millis,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - entry.count,
            reset_at_millis: entry.reset_at_millis,
        }
    }

    /// Drop entries whose window has already ended. Returns how many were
    /// removed. Purely memory reclamation: admission already treats elapsed
    /// entries as absent, so sweeping is safe to run concurrently with checks.
    pub fn sweep(&self) -> usize {
        self.sweep_at(unix_millis())
    }

    fn sweep_at(&self, now_millis: u64) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, entry| entry.reset_at_millis >= now_millis);
        before.saturating_sub(self.windows.len())
    }

    /// Number of identifiers currently tracked.
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

/// Periodically reclaim memory from elapsed windows.
pub fn spawn_sweeper(limiter: RateLimiter, interval: Duration) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let removed = limiter.sweep();
            if removed > 0 {
                counter!(crate::metrics::RATE_LIMIT_SWEPT).increment(removed as u64);
                debug!(removed, "swept expired rate-limit windows");
            }
        }
    });
}
