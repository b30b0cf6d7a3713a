use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use gatehouse_core::{RateLimitError, RateLimiter};

const DEFAULT_MAX_REQUESTS: u32 = 100;
const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

// Stale keys are evicted lazily once the map grows past this many entries.
const EVICTION_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started_at: Instant,
}

/// Fixed-window counter per key. A window opens on the first request and
/// every request inside it increments the count; the first request after
/// the window elapses resets it.
#[derive(Clone)]
pub struct FixedWindowRateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
        }
    }

    fn evict_expired(&self) {
        let window = self.window;
        self.windows
            .retain(|_, entry| entry.started_at.elapsed() < window);
    }
}

impl Default for FixedWindowRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

#[async_trait::async_trait]
impl RateLimiter for FixedWindowRateLimiter {
    async fn check(&self, key: &str) -> Result<(), RateLimitError> {
        if self.windows.len() > EVICTION_THRESHOLD {
            self.evict_expired();
        }

        let mut entry = self.windows.entry(key.to_owned()).or_insert(Window {
            count: 0,
            started_at: Instant::now(),
        });

        if entry.started_at.elapsed() >= self.window {
            entry.count = 0;
            entry.started_at = Instant::now();
        }

        if entry.count >= self.max_requests {
            return Err(RateLimitError::LimitExceeded);
        }

        entry.count += 1;
        Ok(())
    }
}
