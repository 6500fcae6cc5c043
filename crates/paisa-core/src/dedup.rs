//! Receive-time duplicate cache
//!
//! Carriers redeliver SMS, and a device can receive several copies in a
//! burst. The cache remembers fingerprints for a bounded window and answers
//! "seen before?" with an atomic check-then-insert, so two near-simultaneous
//! copies cannot both be accepted. Stale entries are evicted lazily on each
//! lookup; no background timer is needed.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Bounded, time-windowed fingerprint cache owned by one engine instance
#[derive(Debug)]
pub struct DuplicateCache {
    window: Duration,
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl DuplicateCache {
    /// Create a cache with the given retention window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Atomic check-then-insert. Returns true when the fingerprint was
    /// already seen inside the retention window (i.e. the message is a
    /// duplicate); otherwise records it with `now` as first-seen.
    pub fn check_and_insert(&self, fingerprint: &str, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock().expect("duplicate cache poisoned");

        // Lazy eviction of everything outside the window
        let window = self.window;
        entries.retain(|_, first_seen| now.signed_duration_since(*first_seen) <= window);

        if entries.contains_key(fingerprint) {
            debug!(fingerprint, "duplicate fingerprint suppressed");
            return true;
        }

        entries.insert(fingerprint.to_string(), now);
        false
    }

    /// Number of live entries (stale entries may still be counted until the
    /// next lookup evicts them)
    pub fn len(&self) -> usize {
        self.entries.lock().expect("duplicate cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
