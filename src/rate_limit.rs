// src/rate_limit.rs
//! Fixed-window request limiter keyed by session or client identifier
//!
//! A window stays live through its reset instant; the next request after it
//! opens a fresh one. Expired windows are swept whenever the number of tracked
//! identifiers reaches the purge threshold, so the map stays bounded by recent
//! traffic without callers having to run [`RateLimiter::purge_expired`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::consts::RATE_LIMIT_PURGE_THRESHOLD;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    resets_at: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    purge_threshold: usize,
    windows: Mutex<HashMap<String, Window>>,
}

fn sweep(windows: &mut HashMap<String, Window>, now: Instant) -> usize {
    let before = windows.len();
    windows.retain(|_, w| w.resets_at >= now);
    before - windows.len()
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            purge_threshold: RATE_LIMIT_PURGE_THRESHOLD,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Number of tracked identifiers at which `check` sweeps expired windows
    pub fn with_purge_threshold(mut self, threshold: usize) -> Self {
        self.purge_threshold = threshold.max(1);
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.rate_limit.requests_per_minute,
            Duration::from_secs(config.rate_limit.window_secs),
        )
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn check(&self, identifier: &str) -> bool {
        self.check_at(identifier, Instant::now())
    }

    /// Count one request at `now`; false once the window's budget is spent.
    pub fn check_at(&self, identifier: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.len() >= self.purge_threshold {
            let purged = sweep(&mut windows, now);
            tracing::trace!(purged, tracked = windows.len(), "swept expired rate-limit windows");
        }

        match windows.get_mut(identifier) {
            Some(w) if w.resets_at >= now => {
                if w.count >= self.limit {
                    tracing::debug!(identifier, limit = self.limit, "rate limit exceeded");
                    return false;
                }
                w.count += 1;
                true
            }
            _ => {
                windows.insert(
                    identifier.to_string(),
                    Window {
                        count: 1,
                        resets_at: now + self.window,
                    },
                );
                true
            }
        }
    }

    /// Drop windows that ended before `now`; returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        sweep(&mut windows, now)
    }

    pub fn tracked(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
