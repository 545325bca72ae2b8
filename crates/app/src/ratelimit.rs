//! Fixed-window request limiting keyed by client address.

use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use rustc_hash::FxHashMap;

/// Default window length, fifteen minutes.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(900);

/// Default number of requests admitted per key per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 5;

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Limited {
        /// Whole seconds until the window resets, rounded up.
        retry_after_secs: u64,
    },
}

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window counter per key.
///
/// A key's first request opens a window; requests beyond the maximum are
/// refused until the window expires, then the next request opens a fresh
/// one. Expired windows are evicted on every check, so the map never holds
/// more than the keys seen within the last window length.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<FxHashMap<String, Window>>,
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl FixedWindowLimiter {
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(FxHashMap::default()),
        }
    }

    /// Record a request for `key` and decide whether to admit it.
    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        state.retain(|_, window| window.reset_at > now);

        match state.get_mut(key) {
            None => {
                state.insert(
                    key.to_owned(),
                    Window {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );

                Decision::Allowed
            },
            Some(window) if window.count >= self.max_requests => {
                let remaining = window.reset_at.saturating_duration_since(now);

                Decision::Limited {
                    retry_after_secs: remaining.as_secs()
                        + u64::from(remaining.subsec_nanos() > 0),
                }
            },
            Some(window) => {
                window.count += 1;

                Decision::Allowed
            },
        }
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
