//! In-memory fixed-window rate limiting.
//!
//! Single-process fallback for deployments without a shared store. The whole
//! map sits behind one mutex, which serializes the read-modify-write of each
//! key's counter; concurrent requests for the same identity can never lose an
//! update.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::security::epoch_ms;

use super::RateLimitResult;

/// Counter state for one client identity.
struct WindowEntry {
    count: u32,
    /// End of the window, ms since epoch. The entry is expired once passed.
    reset_at: u64,
}

/// Fixed-window counter map with capped size and lazy background sweeping.
pub struct LocalRateLimiter {
    entries: Arc<Mutex<HashMap<String, WindowEntry>>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
    max_entries: usize,
    sweep_interval: Duration,
}

impl LocalRateLimiter {
    pub fn new(max_entries: usize, sweep_interval: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            sweeper: Mutex::new(None),
            max_entries,
            sweep_interval,
        }
    }

    /// Count a request against `key`'s window and decide admission.
    pub fn check(&self, key: &str, max_requests: u32, window: Duration) -> RateLimitResult {
        let now = epoch_ms();
        let window_ms = window.as_millis() as u64;
        let mut entries = self.entries.lock().expect("rate limit map mutex poisoned");

        if let Some(entry) = entries.get_mut(key) {
            if now <= entry.reset_at {
                if entry.count >= max_requests {
                    return RateLimitResult {
                        allowed: false,
                        remaining: 0,
                        reset_at: entry.reset_at,
                    };
                }
                entry.count += 1;
                return RateLimitResult {
                    allowed: true,
                    remaining: max_requests - entry.count,
                    reset_at: entry.reset_at,
                };
            }
            // Window elapsed. Fall through and reinitialize; the stale slot
            // is reclaimed by the purge below if the map is at capacity.
        }

        if entries.len() >= self.max_entries {
            entries.retain(|_, e| now <= e.reset_at);
            if entries.len() >= self.max_entries {
                // Every entry is live. Denying here protects memory; evicting
                // an arbitrary live window would invite limit resets.
                return RateLimitResult {
                    allowed: false,
                    remaining: 0,
                    reset_at: now + window_ms,
                };
            }
        }

        let reset_at = now + window_ms;
        entries.insert(key.to_string(), WindowEntry { count: 1, reset_at });
        drop(entries);
        self.ensure_sweeper();

        RateLimitResult {
            allowed: true,
            remaining: max_requests.saturating_sub(1),
            reset_at,
        }
    }

    /// Spawn the sweep task unless one is already running.
    ///
    /// The task purges expired entries every `sweep_interval` and exits on
    /// its own once the map drains; the next insert restarts it. Idle
    /// processes carry no background work.
    fn ensure_sweeper(&self) {
        let mut slot = self.sweeper.lock().expect("sweeper slot mutex poisoned");
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let entries = Arc::clone(&self.entries);
        let interval = self.sweep_interval;
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick resolves immediately
            loop {
                ticker.tick().await;
                let now = epoch_ms();
                let mut map = entries.lock().expect("rate limit map mutex poisoned");
                map.retain(|_, e| now <= e.reset_at);
                if map.is_empty() {
                    break;
                }
            }
        }));
    }

    /// Abort the sweep task if one is running. Idempotent.
    pub fn shutdown(&self) {
        if let Some(handle) = self
            .sweeper
            .lock()
            .expect("sweeper slot mutex poisoned")
            .take()
        {
            handle.abort();
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    #[cfg(test)]
    fn sweeper_running(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}
