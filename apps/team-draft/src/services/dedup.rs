//! Drops completion events that were already handled.
//!
//! Chat transports redeliver; the same event key arriving twice within the
//! TTL must not count the duty twice.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

#[derive(Clone)]
pub struct CompletionDeduper {
    seen: Cache<String, ()>,
}

impl CompletionDeduper {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            seen: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// True the first time `key` shows up within the TTL.
    pub async fn first_sighting(&self, key: &str) -> bool {
        let fresh = self
            .seen
            .entry(key.to_string())
            .or_insert(())
            .await
            .is_fresh();
        if !fresh {
            debug!(event_key = %key, "Duplicate completion event");
        }
        fresh
    }

    /// Let `key` through again, e.g. after the event failed to apply.
    pub async fn forget(&self, key: &str) {
        self.seen.invalidate(key).await;
    }
}
